use gridstart_core::postscript::{validate_target, PostScript};
use gridstart_core::{Job, PostScriptError, Result};

/// A postscript supplied by the user. Only its path is installed; the job's
/// own `POST.ARGUMENTS` are passed through untouched.
#[derive(Debug, Clone)]
pub struct UserPostScript {
    path: String,
}

impl UserPostScript {
    pub fn initialize(path: Option<&str>) -> Result<Self> {
        let path = path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                PostScriptError::Config("user postscript requires an explicit path".to_string())
            })?;
        Ok(Self {
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PostScript for UserPostScript {
    fn construct(&self, job: &mut Job, key: &str) -> Result<bool> {
        validate_target(job, key)?;
        tracing::debug!(job = %job.name, "Postscript constructed is {}", self.path);
        job.dagman.check_key_in_ns(key, self.path.as_str())?;
        Ok(true)
    }

    fn short_describe(&self) -> &str {
        "user"
    }
}
