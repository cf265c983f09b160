use super::MethodInfo;
use crate::{ast::Expression, error::Error};
use std::{fmt, sync::Arc};

/// Translates calls of the methods it recognizes into SQL.
///
/// Implementations must be pure: the result may only depend on the arguments, as
/// translated trees end up as keys of the command cache.
pub trait MethodCallTranslator: Send + Sync {
    /// Returns `None` for every method this translator does not handle.
    fn translate(
        &self,
        instance: Option<&Expression>,
        method: &MethodInfo,
        arguments: &[Expression],
    ) -> Option<Expression>;
}

/// The chain of translators of a provider. Plugins go first, then the provider's own
/// translators in registration order. The first translator returning a result wins.
#[derive(Clone, Default)]
pub struct MethodCallTranslatorProvider {
    plugins: Vec<Arc<dyn MethodCallTranslator>>,
    translators: Vec<Arc<dyn MethodCallTranslator>>,
}

impl fmt::Debug for MethodCallTranslatorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodCallTranslatorProvider")
            .field("plugins", &self.plugins.len())
            .field("translators", &self.translators.len())
            .finish()
    }
}

impl MethodCallTranslatorProvider {
    pub fn new(translators: impl IntoIterator<Item = Arc<dyn MethodCallTranslator>>) -> Self {
        Self {
            plugins: Vec::new(),
            translators: translators.into_iter().collect(),
        }
    }

    /// Adds a translator that runs before all of the provider's own translators.
    pub fn add_plugin(&mut self, plugin: Arc<dyn MethodCallTranslator>) {
        self.plugins.push(plugin);
    }

    pub fn translate(
        &self,
        instance: Option<&Expression>,
        method: &MethodInfo,
        arguments: &[Expression],
    ) -> Option<Expression> {
        let translated = self
            .plugins
            .iter()
            .chain(self.translators.iter())
            .find_map(|translator| translator.translate(instance, method, arguments));

        if translated.is_none() {
            tracing::trace!(%method, "no translator matched the method call");
        }

        translated
    }

    /// Like [`Self::translate`], but a call nobody recognizes is an error.
    pub fn translate_required(
        &self,
        instance: Option<&Expression>,
        method: &MethodInfo,
        arguments: &[Expression],
    ) -> crate::Result<Expression> {
        self.translate(instance, method, arguments)
            .ok_or_else(|| Error::translation_failed(method.to_string()))
    }
}
