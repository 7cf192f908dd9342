use gridstart_plugins::PostScriptKind;

/// Handle kinds command
pub fn handle_kinds() -> i32 {
    println!("{}", kinds_table());
    0
}

pub fn kinds_table() -> String {
    PostScriptKind::ALL
        .iter()
        .map(|kind| format!("{:<10} {}", kind.as_str(), kind.describe()))
        .collect::<Vec<_>>()
        .join("\n")
}
