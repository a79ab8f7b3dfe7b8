/// Application interaction modes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browse mode: move through the list.
    #[default]
    Browse,
    /// Filter mode: typed characters narrow the list.
    Filter,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Browse => "BROWSE",
            Mode::Filter => "FILTER",
        }
    }
}
