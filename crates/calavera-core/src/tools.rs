//! Tool identifiers, selections and the feature flags derived from them

use crate::error::{Result, SetupError};
use std::fmt;
use std::str::FromStr;

/// Tools offered by the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    EditorConfig,
    Prettier,
    Eslint,
    EslintHtml,
    EslintCss,
    TsConfig,
    TsConfigNoEmit,
    Stylelint,
}

impl Tool {
    /// Every tool, in the order the wizard lists them
    pub const ALL: [Tool; 8] = [
        Tool::EditorConfig,
        Tool::Prettier,
        Tool::Eslint,
        Tool::TsConfig,
        Tool::TsConfigNoEmit,
        Tool::Stylelint,
        Tool::EslintHtml,
        Tool::EslintCss,
    ];

    /// Stable identifier used on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Tool::EditorConfig => "editorconfig",
            Tool::Prettier => "prettier",
            Tool::Eslint => "eslint",
            Tool::EslintHtml => "eslint-html",
            Tool::EslintCss => "eslint-css",
            Tool::TsConfig => "tsconfig",
            Tool::TsConfigNoEmit => "tsconfig-noemit",
            Tool::Stylelint => "stylelint",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::EditorConfig => "EditorConfig",
            Tool::Prettier => "Prettier",
            Tool::Eslint => "ESLint",
            Tool::EslintHtml => "ESLint HTML",
            Tool::EslintCss => "ESLint CSS",
            Tool::TsConfig => "TSConfig",
            Tool::TsConfigNoEmit => "TSConfig (noEmit)",
            Tool::Stylelint => "Stylelint",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Tool::EditorConfig => "Recommended",
            Tool::Prettier => "You probably want Prettier",
            Tool::Eslint => "Writing JavaScript or TypeScript? You need this",
            Tool::EslintHtml => "Writing HTML? Of course you are [x]",
            Tool::EslintCss => "Lint CSS with ESLint too",
            Tool::TsConfig => "Writing bundleless TypeScript? Type the spacebar",
            Tool::TsConfigNoEmit => "Writing TypeScript but also use a bundler? Bundle up to this one",
            Tool::Stylelint => "Writing CSS? input:checked",
        }
    }

    pub fn identifiers() -> Vec<&'static str> {
        Tool::ALL.iter().map(Tool::id).collect()
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Tool {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == wanted)
            .ok_or_else(|| SetupError::UnknownTool(s.trim().to_string()))
    }
}

/// A validated set of selected tools
///
/// An empty selection stands for a cancelled wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSelection {
    tools: Vec<Tool>,
}

impl ToolSelection {
    /// Build a selection, dropping duplicates. Selecting both TypeScript
    /// variants is an error.
    pub fn new(tools: impl IntoIterator<Item = Tool>) -> Result<Self> {
        let mut selected: Vec<Tool> = Vec::new();
        for tool in tools {
            if !selected.contains(&tool) {
                selected.push(tool);
            }
        }

        if selected.contains(&Tool::TsConfig) && selected.contains(&Tool::TsConfigNoEmit) {
            return Err(SetupError::ConflictingTools(
                Tool::TsConfig,
                Tool::TsConfigNoEmit,
            ));
        }

        Ok(Self { tools: selected })
    }

    /// Parse comma-separated or already split identifiers, e.g. from `--tools`
    pub fn parse<S: AsRef<str>>(ids: &[S]) -> Result<Self> {
        let tools = ids
            .iter()
            .flat_map(|s| s.as_ref().split(','))
            .filter(|s| !s.trim().is_empty())
            .map(Tool::from_str)
            .collect::<Result<Vec<_>>>()?;
        Self::new(tools)
    }

    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }

    pub fn iter(&self) -> impl Iterator<Item = Tool> + '_ {
        self.tools.iter().copied()
    }

    /// Whether any of the ESLint family tools is selected
    pub fn wants_linter(&self) -> bool {
        self.contains(Tool::Eslint)
            || self.contains(Tool::EslintHtml)
            || self.contains(Tool::EslintCss)
    }

    pub fn flags(&self) -> FeatureFlags {
        FeatureFlags::from(self)
    }
}

/// Booleans the renderers branch on, derived from a [`ToolSelection`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub with_prettier: bool,
    pub with_typescript: bool,
    pub with_html: bool,
    pub with_css: bool,
}

impl From<&ToolSelection> for FeatureFlags {
    fn from(selection: &ToolSelection) -> Self {
        Self {
            with_prettier: selection.contains(Tool::Prettier),
            with_typescript: selection.contains(Tool::TsConfig)
                || selection.contains(Tool::TsConfigNoEmit),
            with_html: selection.contains(Tool::EslintHtml),
            with_css: selection.contains(Tool::EslintCss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("eslint-html".parse::<Tool>().unwrap(), Tool::EslintHtml);
        assert_eq!(" TSConfig-NoEmit ".parse::<Tool>().unwrap(), Tool::TsConfigNoEmit);
        assert!(matches!(
            "biome".parse::<Tool>(),
            Err(SetupError::UnknownTool(name)) if name == "biome"
        ));
    }

    #[test]
    fn test_every_tool_roundtrips_through_its_id() {
        for tool in Tool::ALL {
            assert_eq!(tool.id().parse::<Tool>().unwrap(), tool);
        }
    }

    #[test]
    fn test_selection_drops_duplicates() {
        let selection =
            ToolSelection::new([Tool::Prettier, Tool::Eslint, Tool::Prettier]).unwrap();
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![Tool::Prettier, Tool::Eslint]);
    }

    #[test]
    fn test_both_tsconfig_variants_conflict() {
        let err = ToolSelection::new([Tool::TsConfig, Tool::TsConfigNoEmit]).unwrap_err();
        assert!(matches!(
            err,
            SetupError::ConflictingTools(Tool::TsConfig, Tool::TsConfigNoEmit)
        ));
    }

    #[test]
    fn test_parse_accepts_comma_lists() {
        let selection = ToolSelection::parse(&["prettier,eslint", "stylelint"]).unwrap();
        assert!(selection.contains(Tool::Prettier));
        assert!(selection.contains(Tool::Eslint));
        assert!(selection.contains(Tool::Stylelint));
        assert!(!selection.contains(Tool::EditorConfig));
    }

    #[test]
    fn test_flags_follow_selection() {
        let selection =
            ToolSelection::parse(&["prettier", "tsconfig-noemit", "eslint-css"]).unwrap();
        let flags = selection.flags();
        assert_eq!(
            flags,
            FeatureFlags {
                with_prettier: true,
                with_typescript: true,
                with_html: false,
                with_css: true,
            }
        );
        assert!(selection.wants_linter());
    }

    #[test]
    fn test_cancelled_selection_is_empty() {
        let selection = ToolSelection::cancelled();
        assert!(selection.is_empty());
        assert_eq!(selection.flags(), FeatureFlags::default());
        assert!(!selection.wants_linter());
    }
}
