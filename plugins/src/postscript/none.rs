use gridstart_core::postscript::PostScript;
use gridstart_core::{Job, Result};

/// Leaves the job without a postscript.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPostScript;

impl PostScript for NoPostScript {
    fn construct(&self, _job: &mut Job, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn short_describe(&self) -> &str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_nothing() {
        let mut job = Job::new("job1");
        job.dagman.construct("RETRY", "2");
        let before = job.clone();

        assert!(!NoPostScript.construct(&mut job, "POST").unwrap());
        assert_eq!(job, before);
    }
}
