//! Wizard step navigation

/// The sections of the wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Applicant,
    Invention,
    Filing,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Applicant,
        WizardStep::Invention,
        WizardStep::Filing,
        WizardStep::Review,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Applicant => 0,
            Self::Invention => 1,
            Self::Filing => 2,
            Self::Review => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Applicant => "Applicant Info",
            Self::Invention => "Invention Details",
            Self::Filing => "Filing & Documents",
            Self::Review => "Review & Submit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Applicant => "Who is applying for this patent, and who invented it.",
            Self::Invention => "Describe your invention in detail.",
            Self::Filing => "When and where you plan to file, plus the required documents.",
            Self::Review => "Verify all information before submitting.",
        }
    }
}

/// Tracks the current step. Moving forward is one step at a time; jumping
/// is only allowed back to a step at or before the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepController {
    index: usize,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_index(self.index).unwrap_or_default()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == WizardStep::COUNT - 1
    }

    /// Move to the next step. Returns false at the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move to the previous step. Returns false at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Whether `jump_to(index)` would be accepted
    pub fn can_jump_to(&self, index: usize) -> bool {
        index <= self.index
    }

    /// Jump to an already-visited step. Requests ahead of the current step are refused.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if !self.can_jump_to(index) {
            tracing::debug!(from = self.index, to = index, "Refusing forward jump");
            return false;
        }
        self.index = index;
        true
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
