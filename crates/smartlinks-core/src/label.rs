use std::fmt;

/// Visible text of a link.
///
/// A label template with a braced span (`G/$1{$2}/G`) renders as
/// [`Label::Padded`] so the sink can style the active part on its own;
/// any other label is [`Label::Flat`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Label {
    Flat { text: String },
    Padded {
        left: String,
        active: String,
        right: String,
    },
}

impl Label {
    pub fn flat(text: impl Into<String>) -> Self {
        Label::Flat { text: text.into() }
    }

    pub fn padded(
        left: impl Into<String>,
        active: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Label::Padded {
            left: left.into(),
            active: active.into(),
            right: right.into(),
        }
    }

    /// The text a reader sees: padding and active span concatenated.
    pub fn text(&self) -> String {
        match self {
            Label::Flat { text } => text.clone(),
            Label::Padded {
                left,
                active,
                right,
            } => format!("{left}{active}{right}"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Label::Flat { text } => text.is_empty(),
            Label::Padded {
                left,
                active,
                right,
            } => left.is_empty() && active.is_empty() && right.is_empty(),
        }
    }
}

/// Template form: the active span is shown in braces.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Flat { text } => f.write_str(text),
            Label::Padded {
                left,
                active,
                right,
            } => write!(f, "{left}{{{active}}}{right}"),
        }
    }
}
