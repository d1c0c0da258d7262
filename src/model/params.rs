//! Timing parameters for one scheduling horizon.

/// Capacity and changeover settings, all in minutes.
///
/// # Examples
///
/// ```
/// use u_surgery::model::TuningParameters;
///
/// let params = TuningParameters::default()
///     .with_max_regular_minutes(480)
///     .with_transition_minutes(30);
/// assert_eq!(params.max_overtime_minutes, 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TuningParameters {
    /// Start of the working day, minutes from midnight. Informational.
    pub start_time: u32,

    /// Regular working time per room before overtime begins.
    pub max_regular_minutes: u32,

    /// Overtime allowed on top of regular time before the hard limit.
    pub max_overtime_minutes: u32,

    /// Changeover between consecutive cases in the same room.
    /// Not charged after the last case.
    pub transition_minutes: u32,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            start_time: 510,
            max_regular_minutes: 540,
            max_overtime_minutes: 120,
            transition_minutes: 45,
        }
    }
}

impl TuningParameters {
    pub fn with_start_time(mut self, minutes: u32) -> Self {
        self.start_time = minutes;
        self
    }

    pub fn with_max_regular_minutes(mut self, minutes: u32) -> Self {
        self.max_regular_minutes = minutes;
        self
    }

    pub fn with_max_overtime_minutes(mut self, minutes: u32) -> Self {
        self.max_overtime_minutes = minutes;
        self
    }

    pub fn with_transition_minutes(mut self, minutes: u32) -> Self {
        self.transition_minutes = minutes;
        self
    }

    /// Usage beyond which every minute counts as hard overtime.
    pub fn hard_limit_minutes(&self) -> u32 {
        self.max_regular_minutes
            .saturating_add(self.max_overtime_minutes)
    }
}
