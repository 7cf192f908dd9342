use crate::error::Result;
use crate::job::Job;
use crate::properties::Properties;

/// Computes where a kind of verification tool is installed by default.
pub trait ToolPathStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn default_path(&self, properties: &Properties) -> Result<String>;
}

/// Writes the postscript directive of a job into its DAGMan profile.
pub trait PostScript: Send + Sync {
    /// Installs the postscript under `key`. Returns `false` when this
    /// postscript decided the job gets none.
    fn construct(&self, job: &mut Job, key: &str) -> Result<bool>;

    fn short_describe(&self) -> &str;
}

/// Adapts a plain function into a [`ToolPathStrategy`].
pub struct FnToolPath<F> {
    name: String,
    f: F,
}

impl<F> FnToolPath<F>
where
    F: Fn(&Properties) -> Result<String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> ToolPathStrategy for FnToolPath<F>
where
    F: Fn(&Properties) -> Result<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn default_path(&self, properties: &Properties) -> Result<String> {
        (self.f)(properties)
    }
}
