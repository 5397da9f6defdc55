use std::collections::HashMap;

use once_cell::sync::Lazy;
use pulldown_cmark::Options;

use crate::element::{ElementKind, RenderRule};

/// A pluggable transform applied while parsing markdown input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputExtension {
    /// GitHub-flavored markdown: tables, strikethrough, task lists.
    Gfm,
    /// `$…$` / `$$…$$` math parsing.
    Math,
}

/// A pluggable transform applied while producing HTML output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputExtension {
    /// Emits math nodes as KaTeX-ready markup.
    MathRenderer,
    /// Dispatches fenced code blocks to the syntax highlighter.
    SyntaxHighlighter,
}

/// Options recognized when building a [`RendererConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigOptions {
    pub math: bool,
    pub gfm: bool,
    pub syntax_highlighting: bool,
    /// Per-element overrides; these win over all built-in rules.
    pub overrides: HashMap<ElementKind, RenderRule>,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            math: true,
            gfm: true,
            syntax_highlighting: true,
            overrides: HashMap::new(),
        }
    }
}

static UNSTYLED: Lazy<RenderRule> = Lazy::new(RenderRule::unstyled);

/// Declarative description of the active markdown extensions and the
/// per-element render rules.
///
/// Construction is pure and total; the rule table always covers every
/// [`ElementKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    input_extensions: Vec<InputExtension>,
    output_extensions: Vec<OutputExtension>,
    rules: HashMap<ElementKind, RenderRule>,
}

impl RendererConfig {
    pub fn new(options: ConfigOptions) -> Self {
        let mut rules: HashMap<ElementKind, RenderRule> = ElementKind::ALL
            .iter()
            .map(|&kind| (kind, kind.default_rule()))
            .collect();

        let mut input_extensions = Vec::new();
        let mut output_extensions = Vec::new();
        if options.gfm {
            input_extensions.push(InputExtension::Gfm);
        }
        if options.math {
            input_extensions.push(InputExtension::Math);
            output_extensions.push(OutputExtension::MathRenderer);
        }
        if options.syntax_highlighting {
            output_extensions.push(OutputExtension::SyntaxHighlighter);
        }

        // Caller overrides are merged last and win.
        rules.extend(options.overrides);

        Self {
            input_extensions,
            output_extensions,
            rules,
        }
    }

    /// Ordered input-transform extension list.
    pub fn input_extensions(&self) -> &[InputExtension] {
        &self.input_extensions
    }

    /// Ordered output-transform extension list.
    pub fn output_extensions(&self) -> &[OutputExtension] {
        &self.output_extensions
    }

    pub fn has_input_extension(&self, ext: InputExtension) -> bool {
        self.input_extensions.contains(&ext)
    }

    pub fn has_output_extension(&self, ext: OutputExtension) -> bool {
        self.output_extensions.contains(&ext)
    }

    pub fn rules(&self) -> &HashMap<ElementKind, RenderRule> {
        &self.rules
    }

    /// Render rule for one element kind.
    pub fn rule(&self, kind: ElementKind) -> &RenderRule {
        self.rules.get(&kind).unwrap_or(&UNSTYLED)
    }

    /// Parser option flags derived from the active input extensions.
    pub fn parser_options(&self) -> Options {
        let mut opts = Options::empty();
        for ext in &self.input_extensions {
            match ext {
                InputExtension::Gfm => {
                    opts.insert(Options::ENABLE_TABLES);
                    opts.insert(Options::ENABLE_STRIKETHROUGH);
                    opts.insert(Options::ENABLE_TASKLISTS);
                }
                InputExtension::Math => {
                    opts.insert(Options::ENABLE_MATH);
                }
            }
        }
        opts
    }

    pub fn add_input_extension(&mut self, ext: InputExtension) -> &mut Self {
        if !self.input_extensions.contains(&ext) {
            self.input_extensions.push(ext);
        }
        self
    }

    pub fn add_output_extension(&mut self, ext: OutputExtension) -> &mut Self {
        if !self.output_extensions.contains(&ext) {
            self.output_extensions.push(ext);
        }
        self
    }

    pub fn set_rule(&mut self, kind: ElementKind, rule: RenderRule) -> &mut Self {
        self.rules.insert(kind, rule);
        self
    }

    pub fn merge_rules(&mut self, rules: HashMap<ElementKind, RenderRule>) -> &mut Self {
        self.rules.extend(rules);
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new(ConfigOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let cfg = RendererConfig::default();
        assert!(cfg.has_input_extension(InputExtension::Gfm));
        assert!(cfg.has_input_extension(InputExtension::Math));
        assert!(cfg.has_output_extension(OutputExtension::MathRenderer));
        assert!(cfg.has_output_extension(OutputExtension::SyntaxHighlighter));
        assert_eq!(cfg.rules().len(), ElementKind::ALL.len());
    }

    #[test]
    fn disabling_math_removes_both_sides() {
        let cfg = RendererConfig::new(ConfigOptions {
            math: false,
            ..ConfigOptions::default()
        });
        assert!(!cfg.has_input_extension(InputExtension::Math));
        assert!(!cfg.has_output_extension(OutputExtension::MathRenderer));
        assert!(!cfg.parser_options().contains(Options::ENABLE_MATH));
    }

    #[test]
    fn overrides_win_over_builtins() {
        let mut overrides = HashMap::new();
        overrides.insert(ElementKind::Paragraph, RenderRule::new("lead"));
        let cfg = RendererConfig::new(ConfigOptions {
            overrides,
            ..ConfigOptions::default()
        });
        assert_eq!(cfg.rule(ElementKind::Paragraph).class, "lead");
        // Untouched kinds keep their built-in rule.
        assert_eq!(cfg.rule(ElementKind::Heading1).class, "md-h1");
    }

    #[test]
    fn mutators_chain_and_deduplicate() {
        let mut cfg = RendererConfig::new(ConfigOptions {
            gfm: false,
            math: false,
            syntax_highlighting: false,
            overrides: HashMap::new(),
        });
        cfg.add_input_extension(InputExtension::Gfm)
            .add_input_extension(InputExtension::Gfm)
            .add_output_extension(OutputExtension::SyntaxHighlighter)
            .set_rule(ElementKind::Link, RenderRule::new("ext-link"));
        assert_eq!(cfg.input_extensions().len(), 1);
        assert_eq!(cfg.output_extensions().len(), 1);
        assert_eq!(cfg.rule(ElementKind::Link).class, "ext-link");
    }

    #[test]
    fn gfm_flag_controls_table_parsing() {
        let gfm = RendererConfig::default();
        assert!(gfm.parser_options().contains(Options::ENABLE_TABLES));
        let plain = RendererConfig::new(ConfigOptions {
            gfm: false,
            ..ConfigOptions::default()
        });
        assert!(!plain.parser_options().contains(Options::ENABLE_TABLES));
    }
}
