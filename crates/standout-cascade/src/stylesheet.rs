//! YAML stylesheets.
//!
//! A stylesheet declares named styles and modifier tables in one document and
//! compiles them into a registry in a single pass:
//!
//! ```yaml
//! styles:
//!   card: { padding: 4, backgroundColor: white }
//!   tinted: { color: { dynamic: tint } }
//! modifiers:
//!   button:
//!     size:
//!       small: { padding: 2 }
//!       large: { padding: 8 }
//! ```
//!
//! # Values
//!
//! | YAML                 | Meaning                                   |
//! |----------------------|-------------------------------------------|
//! | `4`, `0.5`           | Number (`px` added unless unitless)       |
//! | `white`, `"1rem"`    | Literal CSS text                          |
//! | `null` / `~`         | `unset`                                   |
//! | `{ var: name }`      | Reference to `--name`                     |
//! | `{ dynamic: key }`   | Render-time value (needs extraction)      |
//!
//! Declaration order is preserved throughout, so modifier dimensions keep
//! the precedence they were written in.

use indexmap::IndexMap;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::compile::{CompileOptions, DeclValue, Declaration, ModifierDeclaration, StyleCompiler};
use crate::modifier::ModifierTable;
use crate::registry::Identifier;
use crate::style::{PropertyValue, StyleError, VariableName};

/// Error returned when loading or compiling a stylesheet.
#[derive(Debug, Error)]
pub enum StylesheetError {
    #[error("invalid stylesheet: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("cannot compile '{name}': {source}")]
    Compile {
        name: String,
        #[source]
        source: StyleError,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum SheetValue {
    Unset(()),
    Number(f64),
    Text(String),
    Var { var: String },
    Dynamic { dynamic: String },
}

impl From<&SheetValue> for DeclValue {
    fn from(value: &SheetValue) -> Self {
        match value {
            SheetValue::Unset(()) => DeclValue::Static(PropertyValue::Unset),
            SheetValue::Number(n) => DeclValue::Static(PropertyValue::Number(*n)),
            SheetValue::Text(text) => DeclValue::Static(PropertyValue::Text(text.clone())),
            SheetValue::Var { var } => DeclValue::Static(PropertyValue::Var(VariableName::new(var))),
            SheetValue::Dynamic { dynamic } => DeclValue::Dynamic(dynamic.clone()),
        }
    }
}

type SheetDeclaration = IndexMap<String, SheetValue>;

fn declaration(sheet: &SheetDeclaration) -> Declaration {
    let mut decl = Declaration::new();
    for (name, value) in sheet {
        decl.insert(name, DeclValue::from(value));
    }
    decl
}

/// A parsed, not yet compiled, stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Stylesheet {
    styles: IndexMap<String, SheetDeclaration>,
    modifiers: IndexMap<String, IndexMap<String, IndexMap<String, SheetDeclaration>>>,
}

impl Stylesheet {
    /// Parses a stylesheet from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, StylesheetError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Names of the declared styles, in order.
    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Names of the declared modifier tables, in order.
    pub fn modifier_names(&self) -> impl Iterator<Item = &str> {
        self.modifiers.keys().map(String::as_str)
    }

    /// Compiles every style and modifier table.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError::Compile`] naming the first style or
    /// modifier table that fails. Entries compiled before the failure stay
    /// in the registry (it is append-only).
    pub fn compile(
        &self,
        compiler: &StyleCompiler<'_>,
        options: &CompileOptions,
    ) -> Result<CompiledSheet, StylesheetError> {
        let mut compiled = CompiledSheet::default();

        for (name, sheet) in &self.styles {
            let id = compiler
                .compile(&declaration(sheet), options)
                .map_err(|source| StylesheetError::Compile {
                    name: name.clone(),
                    source,
                })?;
            compiled.styles.insert(name.clone(), id);
        }

        for (name, dimensions) in &self.modifiers {
            let mut decl = ModifierDeclaration::new();
            for (modifier, variants) in dimensions {
                for (key, sheet) in variants {
                    decl = decl.variant(modifier, key, declaration(sheet));
                }
            }
            let table = compiler
                .compile_modifiers(&decl, options)
                .map_err(|source| StylesheetError::Compile {
                    name: name.clone(),
                    source,
                })?;
            compiled.modifiers.insert(name.clone(), table);
        }

        info!(
            "compiled stylesheet: {} styles, {} modifier tables",
            compiled.styles.len(),
            compiled.modifiers.len()
        );
        Ok(compiled)
    }
}

/// The identifiers and tables produced by compiling a [`Stylesheet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledSheet {
    pub styles: IndexMap<String, Identifier>,
    pub modifiers: IndexMap<String, ModifierTable>,
}

impl CompiledSheet {
    pub fn style(&self, name: &str) -> Option<&Identifier> {
        self.styles.get(name)
    }

    pub fn modifier(&self, name: &str) -> Option<&ModifierTable> {
        self.modifiers.get(name)
    }
}
