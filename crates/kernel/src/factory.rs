use crate::TemplateKernel;
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;
use webpreview_traits::{Kernel, KernelError, KernelFactory};

/// Builds a [`TemplateKernel`] holding a fixed template set.
///
/// Every call compiles the templates afresh; wrap it in a
/// `CachedKernelFactory` to build one kernel per environment.
#[derive(Debug, Clone, Default)]
pub struct TemplateKernelFactory {
    templates: BTreeMap<String, String>,
}

impl TemplateKernelFactory {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

impl KernelFactory for TemplateKernelFactory {
    fn create(&self, environment: &str) -> Result<Arc<dyn Kernel>, KernelError> {
        let mut kernel = TemplateKernel::new(environment);
        for (name, source) in &self.templates {
            kernel
                .register_template(name, source)
                .map_err(|e| KernelError::Boot {
                    environment: environment.to_string(),
                    message: e.to_string(),
                })?;
        }
        info!(
            "Compiled {} template(s) for environment '{}'.",
            self.templates.len(),
            environment
        );
        Ok(Arc::new(kernel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_kernel_with_all_templates() {
        let factory = TemplateKernelFactory::default()
            .with_template("page", "<h1>{{object.data.title}}</h1>")
            .with_template("page:content", "{{object.data.title}}");
        assert_eq!(factory.template_count(), 2);
        assert!(factory.create("prod").is_ok());
    }

    #[test]
    fn broken_template_fails_boot() {
        let factory = TemplateKernelFactory::default().with_template("page", "{{#each}}");
        let result = factory.create("dev");
        assert!(matches!(
            result,
            Err(KernelError::Boot { ref environment, .. }) if environment == "dev"
        ));
    }
}
