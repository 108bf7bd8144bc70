//! Boundary-safe reference rewriting.
//!
//! Generated text refers to models and persistence interfaces by simple and
//! qualified names. When a type moves to a base or extension name, every
//! reference has to follow without corrupting longer names that merely
//! start with the same text: `Order` must not turn `OrderExample` into
//! `OrderBaseExample`.
//!
//! Rules are applied in a single left-to-right pass. At each position the
//! longest matching rule wins, a match only counts on identifier boundaries
//! and replaced text is never scanned again.

use genkeep_core::is_ident_char;

/// Replace `from` with `to` wherever `from` appears as a whole name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

/// An ordered set of [`RewriteRule`]s.
///
/// # Example
///
/// ```
/// use genkeep_publish::ReferenceRewriter;
///
/// let rewritten = ReferenceRewriter::new()
///     .pin("OrderExample")
///     .rule("Order", "OrderBase")
///     .apply("Order o; OrderExample e; OrderItem i;");
///
/// assert_eq!(rewritten, "OrderBase o; OrderExample e; OrderItem i;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceRewriter {
    rules: Vec<RewriteRule>,
}

impl ReferenceRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Empty `from` patterns are ignored.
    pub fn rule(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        if !from.is_empty() {
            self.rules.push(RewriteRule {
                from,
                to: to.into(),
            });
        }
        self
    }

    /// Keep `name` as it is, shielding it from shorter rules.
    pub fn pin(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.rule(name.clone(), name)
    }

    /// Rules in evaluation order: longest pattern first, ties in insertion
    /// order.
    pub fn rules(&self) -> Vec<&RewriteRule> {
        let mut ordered: Vec<_> = self.rules.iter().collect();
        ordered.sort_by(|a, b| b.from.len().cmp(&a.from.len()));
        ordered
    }

    pub fn apply(&self, text: &str) -> String {
        let rules = self.rules();
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        let mut prev: Option<char> = None;

        while let Some(c) = rest.chars().next() {
            let at_boundary = !prev.is_some_and(is_ident_char);
            let matched = if at_boundary {
                rules.iter().find(|rule| matches_at(rest, &rule.from))
            } else {
                None
            };

            match matched {
                Some(rule) => {
                    out.push_str(&rule.to);
                    rest = &rest[rule.from.len()..];
                    prev = rule.from.chars().next_back();
                }
                None => {
                    out.push(c);
                    rest = &rest[c.len_utf8()..];
                    prev = Some(c);
                }
            }
        }

        out
    }
}

/// Whether `rest` starts with `pattern` followed by a name boundary.
fn matches_at(rest: &str, pattern: &str) -> bool {
    rest.strip_prefix(pattern)
        .is_some_and(|after| !after.chars().next().is_some_and(is_ident_char))
}
