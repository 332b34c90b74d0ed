// crates/trimwire-core/src/state.rs
// Pure editor data: no egui, no HTTP, no runtime handles.
// Used by trimwire-client and trimwire-ui alike.

use uuid::Uuid;

/// Which trim bound a nudge targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimBound {
    Start,
    End,
}

/// Which staged preview a playback command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewSource {
    Input,
    Result,
}

/// Discriminant for [`Action`], used where only the variant choice matters
/// (the radio row, `SetAction` commands).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Passthrough,  // hand the file through unchanged
    Trim,         // keep the [start, end] window
    Speed,        // change the playback rate
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] =
        [ActionKind::Passthrough, ActionKind::Trim, ActionKind::Speed];

    /// Radio-row label in the transform panel.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Passthrough => "None",
            ActionKind::Trim        => "Trim",
            ActionKind::Speed       => "Speed",
        }
    }
}

/// The one transformation applied by the processing service.
/// Exactly one variant is active; switching variants starts from defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Passthrough,
    Trim  { start_secs: u32, end_secs: u32 },
    Speed { factor: f32 },
}

impl Action {
    pub const MIN_SPEED: f32 = 0.5;
    pub const MAX_SPEED: f32 = 2.0;
    /// Slider increment. A hint for the UI only: any in-range value is kept.
    pub const SPEED_STEP: f32 = 0.1;

    /// Fresh variant for `kind`, parameters at their defaults.
    pub fn default_for(kind: ActionKind) -> Action {
        match kind {
            ActionKind::Passthrough => Action::Passthrough,
            ActionKind::Trim        => Action::Trim { start_secs: 0, end_secs: 0 },
            ActionKind::Speed       => Action::Speed { factor: 1.0 },
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Passthrough  => ActionKind::Passthrough,
            Action::Trim { .. }  => ActionKind::Trim,
            Action::Speed { .. } => ActionKind::Speed,
        }
    }

    /// Wire discriminator sent in the `action` field.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Action::Passthrough  => "none",
            Action::Trim { .. }  => "trim",
            Action::Speed { .. } => "speed",
        }
    }

    /// Trim bounds for serialization. Inactive variants report the defaults:
    /// the request always carries every field, and the service ignores the
    /// ones irrelevant to the chosen action.
    pub fn trim_bounds(&self) -> (u32, u32) {
        match *self {
            Action::Trim { start_secs, end_secs } => (start_secs, end_secs),
            _ => (0, 0),
        }
    }

    /// Speed factor for serialization; 1.0 (unchanged rate) when inactive.
    pub fn speed_factor(&self) -> f32 {
        match *self {
            Action::Speed { factor } => factor,
            _ => 1.0,
        }
    }

    /// Seconds the trim window would keep. Bounds are clamped independently,
    /// so an inverted range is representable; it reads (and submits) as 0.
    pub fn effective_trim_secs(&self) -> u32 {
        let (start, end) = self.trim_bounds();
        end.saturating_sub(start)
    }
}

/// Output container requested from the processing service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Mp3,
    Wav,
    Flac,
    Aac,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] =
        [OutputFormat::Mp3, OutputFormat::Wav, OutputFormat::Flac, OutputFormat::Aac];

    /// Wire value for the `format` field. Doubles as the file extension.
    pub fn wire_name(self) -> &'static str {
        match self {
            OutputFormat::Mp3  => "mp3",
            OutputFormat::Wav  => "wav",
            OutputFormat::Flac => "flac",
            OutputFormat::Aac  => "aac",
        }
    }

    pub fn extension(self) -> &'static str {
        self.wire_name()
    }

    /// Content type implied by this container in the service's response.
    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Mp3  => "audio/mpeg",
            OutputFormat::Wav  => "audio/wav",
            OutputFormat::Flac => "audio/flac",
            OutputFormat::Aac  => "audio/aac",
        }
    }

    /// ComboBox label in the transform panel.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Mp3  => "MP3",
            OutputFormat::Wav  => "WAV",
            OutputFormat::Flac => "FLAC",
            OutputFormat::Aac  => "AAC",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Mp3
    }
}

/// Lifecycle of the one allowed in-flight submission.
///
/// ```text
/// Idle ──submit──▶ Submitting ──settle──▶ Succeeded ─┐
///   ▲                                  └▶ Failed    ─┤
///   └──────────────── dismiss / resubmit ────────────┘
/// ```
///
/// The result resource itself lives in the controller's result slot, not
/// in `Succeeded`: a later failure must leave a previously successful
/// result untouched and playable.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting { job_id: Uuid },
    Succeeded  { job_id: Uuid },
    Failed     { message: String },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    /// The in-flight job id, when one exists. Settlements for any other id
    /// are stale and must be ignored.
    pub fn in_flight_job(&self) -> Option<Uuid> {
        match self {
            SubmissionState::Submitting { job_id } => Some(*job_id),
            _ => None,
        }
    }

    /// Settled states a banner can be dismissed from.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. })
    }
}

/// The whole user-visible editor model. Mutated only through the methods
/// below; every mutation is a pure transition the UI layer can replay.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub action:     Action,
    pub format:     OutputFormat,
    pub submission: SubmissionState,
    pub volume:     f32,
    pub muted:      bool,
    /// Transient status line under the submit row: "no file" prompts,
    /// save confirmations. Cleared on dismiss and on the next submission.
    pub notice:     Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            action:     Action::Passthrough,
            format:     OutputFormat::Mp3,
            submission: SubmissionState::Idle,
            volume:     1.0,
            muted:      false,
            notice:     None,
        }
    }
}

impl EditorState {
    // ── Transform parameters ─────────────────────────────────────────────────

    /// Switch the active action variant. The new variant starts from its
    /// defaults; parameters never carry over, even when re-activating the
    /// same kind.
    pub fn set_action(&mut self, kind: ActionKind) {
        self.action = Action::default_for(kind);
    }

    /// Nudge one trim bound by `delta` seconds, flooring at 0. Direct
    /// numeric entry routes through here too (delta = entered - current).
    /// No-op unless `Trim` is active.
    pub fn adjust_trim_bound(&mut self, bound: TrimBound, delta: i64) {
        if let Action::Trim { start_secs, end_secs } = &mut self.action {
            let slot = match bound {
                TrimBound::Start => start_secs,
                TrimBound::End   => end_secs,
            };
            *slot = (*slot as i64)
                .saturating_add(delta)
                .clamp(0, u32::MAX as i64) as u32;
        }
    }

    /// Clamp into [0.5, 2.0]. In-range values are stored exactly as given;
    /// the slider steps by 0.1 but text entry may carry more precision.
    /// Non-finite input is ignored. No-op unless `Speed` is active.
    pub fn set_speed_factor(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        if let Action::Speed { factor } = &mut self.action {
            *factor = value.clamp(Action::MIN_SPEED, Action::MAX_SPEED);
        }
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    // ── Submission lifecycle ─────────────────────────────────────────────────

    /// Enter `Submitting` for `job_id`. Returns false (and changes nothing)
    /// while another submission is in flight: the single-flight rule.
    /// Clears any stale notice so the banner area shows only live status.
    pub fn begin_submission(&mut self, job_id: Uuid) -> bool {
        if self.submission.is_submitting() {
            return false;
        }
        self.submission = SubmissionState::Submitting { job_id };
        self.notice = None;
        true
    }

    /// Settle the in-flight submission as succeeded. Ignored (returns false)
    /// unless `job_id` matches the current in-flight job, so a stale
    /// settlement never clobbers a newer submission.
    pub fn finish_submission(&mut self, job_id: Uuid) -> bool {
        match self.submission {
            SubmissionState::Submitting { job_id: current } if current == job_id => {
                self.submission = SubmissionState::Succeeded { job_id };
                true
            }
            _ => false,
        }
    }

    /// Settle the in-flight submission as failed. Same stale-job guard as
    /// [`finish_submission`](Self::finish_submission).
    pub fn fail_submission(&mut self, job_id: Uuid, message: String) -> bool {
        match self.submission {
            SubmissionState::Submitting { job_id: current } if current == job_id => {
                self.submission = SubmissionState::Failed { message };
                true
            }
            _ => false,
        }
    }

    /// Dismiss a terminal banner, returning the machine to `Idle`. A live
    /// `Submitting` state is left alone (there is no cancel). Also clears
    /// the transient notice.
    pub fn dismiss_submission(&mut self) {
        if self.submission.is_terminal() {
            self.submission = SubmissionState::Idle;
        }
        self.notice = None;
    }

    // ── Playback ─────────────────────────────────────────────────────────────

    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Gain applied to preview playback; 0 while muted.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_bound_never_goes_negative() {
        let mut state = EditorState::default();
        state.set_action(ActionKind::Trim);

        state.adjust_trim_bound(TrimBound::Start, -5);
        assert_eq!(state.action.trim_bounds().0, 0);

        state.adjust_trim_bound(TrimBound::Start, 7);
        state.adjust_trim_bound(TrimBound::Start, -3);
        assert_eq!(state.action.trim_bounds().0, 4);

        state.adjust_trim_bound(TrimBound::End, i64::MIN);
        assert_eq!(state.action.trim_bounds().1, 0);

        state.adjust_trim_bound(TrimBound::End, i64::MAX);
        assert_eq!(state.action.trim_bounds().1, u32::MAX);
    }

    #[test]
    fn trim_nudges_ignored_when_trim_not_active() {
        let mut state = EditorState::default();
        state.adjust_trim_bound(TrimBound::Start, 10);
        assert_eq!(state.action, Action::Passthrough);
    }

    #[test]
    fn speed_clamps_out_of_range_and_keeps_in_range() {
        let mut state = EditorState::default();
        state.set_action(ActionKind::Speed);

        state.set_speed_factor(3.7);
        assert_eq!(state.action.speed_factor(), 2.0);

        state.set_speed_factor(0.1);
        assert_eq!(state.action.speed_factor(), 0.5);

        state.set_speed_factor(1.3);
        assert_eq!(state.action.speed_factor(), 1.3);

        state.set_speed_factor(0.75);
        assert_eq!(state.action.speed_factor(), 0.75);

        state.set_speed_factor(f32::NAN);
        assert_eq!(state.action.speed_factor(), 0.75);
    }

    #[test]
    fn switching_action_resets_parameters() {
        let mut state = EditorState::default();
        state.set_action(ActionKind::Trim);
        state.adjust_trim_bound(TrimBound::Start, 5);
        state.adjust_trim_bound(TrimBound::End, 10);
        assert_eq!(state.action, Action::Trim { start_secs: 5, end_secs: 10 });

        state.set_action(ActionKind::Speed);
        state.set_action(ActionKind::Trim);
        assert_eq!(state.action, Action::Trim { start_secs: 0, end_secs: 0 });
    }

    #[test]
    fn inactive_variants_serialize_as_defaults() {
        let mut state = EditorState::default();
        state.set_action(ActionKind::Trim);
        state.adjust_trim_bound(TrimBound::Start, 2);
        state.adjust_trim_bound(TrimBound::End, 8);

        assert_eq!(state.action.wire_name(), "trim");
        assert_eq!(state.action.trim_bounds(), (2, 8));
        assert_eq!(state.action.speed_factor(), 1.0);

        state.set_action(ActionKind::Passthrough);
        assert_eq!(state.action.wire_name(), "none");
        assert_eq!(state.action.trim_bounds(), (0, 0));
        assert_eq!(state.action.speed_factor(), 1.0);
    }

    #[test]
    fn effective_trim_floors_inverted_ranges() {
        let mut state = EditorState::default();
        state.set_action(ActionKind::Trim);
        state.adjust_trim_bound(TrimBound::Start, 10);
        state.adjust_trim_bound(TrimBound::End, 4);
        assert_eq!(state.action.effective_trim_secs(), 0);

        state.adjust_trim_bound(TrimBound::End, 8); // end = 12
        assert_eq!(state.action.effective_trim_secs(), 2);
    }

    #[test]
    fn submission_is_single_flight() {
        let mut state = EditorState::default();
        let first = Uuid::new_v4();

        assert!(state.begin_submission(first));
        assert!(!state.begin_submission(Uuid::new_v4()));
        assert_eq!(state.submission, SubmissionState::Submitting { job_id: first });
    }

    #[test]
    fn stale_settlements_are_ignored() {
        let mut state = EditorState::default();
        let job = Uuid::new_v4();
        state.begin_submission(job);

        assert!(!state.finish_submission(Uuid::new_v4()));
        assert!(!state.fail_submission(Uuid::new_v4(), "late".into()));
        assert!(state.submission.is_submitting());

        assert!(state.fail_submission(job, "decode error".into()));
        assert_eq!(
            state.submission,
            SubmissionState::Failed { message: "decode error".into() }
        );
    }

    #[test]
    fn terminal_states_resubmit_through_submitting() {
        let mut state = EditorState::default();
        let first = Uuid::new_v4();
        state.begin_submission(first);
        state.finish_submission(first);
        assert!(state.submission.is_terminal());

        let second = Uuid::new_v4();
        assert!(state.begin_submission(second));
        assert_eq!(state.submission, SubmissionState::Submitting { job_id: second });
    }

    #[test]
    fn dismiss_clears_terminal_but_not_in_flight() {
        let mut state = EditorState::default();
        let job = Uuid::new_v4();

        state.begin_submission(job);
        state.dismiss_submission();
        assert!(state.submission.is_submitting());

        state.fail_submission(job, "boom".into());
        state.dismiss_submission();
        assert_eq!(state.submission, SubmissionState::Idle);
    }

    #[test]
    fn begin_submission_clears_stale_notice() {
        let mut state = EditorState::default();
        state.notice = Some("no audio file selected".into());
        state.begin_submission(Uuid::new_v4());
        assert_eq!(state.notice, None);
    }

    #[test]
    fn muted_playback_has_zero_gain() {
        let mut state = EditorState::default();
        state.set_volume(0.8);
        assert_eq!(state.effective_volume(), 0.8);
        state.toggle_mute();
        assert_eq!(state.effective_volume(), 0.0);
        state.toggle_mute();
        assert_eq!(state.effective_volume(), 0.8);
    }
}
