use std::collections::HashMap;
use std::sync::Arc;

use super::CredentialFormatBuilder;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CredentialFormatBuilderProvider: Send + Sync {
    fn get_format_builder(&self, format: &str) -> Option<Arc<dyn CredentialFormatBuilder>>;
}

pub struct CredentialFormatBuilderProviderImpl {
    builders: HashMap<String, Arc<dyn CredentialFormatBuilder>>,
}

impl CredentialFormatBuilderProviderImpl {
    pub fn new(builders: HashMap<String, Arc<dyn CredentialFormatBuilder>>) -> Self {
        Self { builders }
    }
}

impl CredentialFormatBuilderProvider for CredentialFormatBuilderProviderImpl {
    fn get_format_builder(&self, format: &str) -> Option<Arc<dyn CredentialFormatBuilder>> {
        self.builders.get(format).cloned()
    }
}
