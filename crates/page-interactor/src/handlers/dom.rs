//! DOM data handler: attribute, class-list, text and pseudo-element reads
//! and writes with typed results.

use crate::command::{CommandHandler, DecodedValue};
use crate::errors::InteractError;

pub struct DomHandler {
    commands: CommandHandler,
}

impl DomHandler {
    pub fn new(commands: CommandHandler) -> Self {
        Self { commands }
    }

    /// Attribute value of the first matching element; `None` when the element
    /// does not exist or lacks the attribute.
    pub async fn get_attr(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Option<String>, InteractError> {
        match self.commands.run(&js_commands::get_attr(selector, attr)).await? {
            DecodedValue::Text(value) => Ok(Some(value)),
            DecodedValue::Absent => Ok(None),
            other => Err(mismatch("string", &other)),
        }
    }

    pub async fn set_attr(
        &self,
        selector: &str,
        attr: &str,
        value: &str,
    ) -> Result<(), InteractError> {
        self.commands
            .run(&js_commands::set_attr(selector, attr, value))
            .await?;
        Ok(())
    }

    /// Classes of the first matching element, in DOM order. Empty when the
    /// element does not exist.
    pub async fn class_list(&self, selector: &str) -> Result<Vec<String>, InteractError> {
        match self.commands.run(&js_commands::class_list(selector)).await? {
            DecodedValue::TextList(classes) => Ok(classes),
            DecodedValue::Absent => Ok(Vec::new()),
            other => Err(mismatch("token list", &other)),
        }
    }

    pub async fn add_class(&self, selector: &str, class_name: &str) -> Result<(), InteractError> {
        self.commands
            .run(&js_commands::add_class(selector, class_name))
            .await?;
        Ok(())
    }

    pub async fn remove_class(&self, selector: &str, class_name: &str) -> Result<(), InteractError> {
        self.commands
            .run(&js_commands::remove_class(selector, class_name))
            .await?;
        Ok(())
    }

    pub async fn toggle_class(&self, selector: &str, class_name: &str) -> Result<(), InteractError> {
        self.commands
            .run(&js_commands::toggle_class(selector, class_name))
            .await?;
        Ok(())
    }

    pub async fn text_content(&self, selector: &str) -> Result<Option<String>, InteractError> {
        match self.commands.run(&js_commands::text_content(selector)).await? {
            DecodedValue::Text(text) => Ok(Some(text)),
            DecodedValue::Absent => Ok(None),
            other => Err(mismatch("string", &other)),
        }
    }

    /// Text content of every matching element, in document order.
    pub async fn text_contents(&self, selector: &str) -> Result<Vec<String>, InteractError> {
        match self.commands.run(&js_commands::text_contents(selector)).await? {
            DecodedValue::TextList(texts) => Ok(texts),
            DecodedValue::Absent => Ok(Vec::new()),
            other => Err(mismatch("array of strings", &other)),
        }
    }

    pub async fn has_before_pseudo(&self, selector: &str) -> Result<bool, InteractError> {
        self.pseudo(js_commands::has_before_pseudo(selector)).await
    }

    pub async fn has_after_pseudo(&self, selector: &str) -> Result<bool, InteractError> {
        self.pseudo(js_commands::has_after_pseudo(selector)).await
    }

    async fn pseudo(&self, cmd: js_commands::Command) -> Result<bool, InteractError> {
        match self.commands.run(&cmd).await? {
            DecodedValue::Bool(present) => Ok(present),
            DecodedValue::Absent => Ok(false),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

fn mismatch(expected: &'static str, got: &DecodedValue) -> InteractError {
    InteractError::Decode {
        expected,
        got: format!("{got:?}"),
    }
}
