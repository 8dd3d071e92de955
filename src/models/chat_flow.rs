use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const HOME_CHAT_FLOW_VERSION: &str = "home-1.0.0";

const PAYLOAD_LOCALE: &str = "ko-KR";
const PAYLOAD_SOURCE: &str = "web";

/// The fixed intake step order. Advancing past Summary or backing out of
/// Issue yields None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatFlowStep {
    Issue,
    LastSeen,
    Tenure,
    HomeType,
    Region,
    Calendar,
    Summary,
}

pub const STEP_ORDER: [ChatFlowStep; 7] = [
    ChatFlowStep::Issue,
    ChatFlowStep::LastSeen,
    ChatFlowStep::Tenure,
    ChatFlowStep::HomeType,
    ChatFlowStep::Region,
    ChatFlowStep::Calendar,
    ChatFlowStep::Summary,
];

impl ChatFlowStep {
    fn index(&self) -> usize {
        STEP_ORDER
            .iter()
            .position(|step| step == self)
            .unwrap_or(0)
    }

    pub fn next(&self) -> Option<ChatFlowStep> {
        STEP_ORDER.get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<ChatFlowStep> {
        self.index().checked_sub(1).map(|i| STEP_ORDER[i])
    }
}

/// An answer that is either a catalog code or, for "other" codes, free text
/// confirmed by the customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeAnswer {
    pub code: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionAnswer {
    #[serde(rename = "macro")]
    pub macro_code: Option<String>,
    /// Only meaningful when the macro region is REGION_SEOUL.
    #[serde(rename = "micro")]
    pub micro_code: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleAnswer {
    /// "YYYY-MM-DD"
    pub date: Option<String>,
    /// Slot start time, e.g. "14:00"
    pub time_slot: Option<String>,
}

/// In-progress intake state for one customer session. Not persisted; a
/// booking is only written once the state converts into a payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatFlowState {
    pub current_step: ChatFlowStep,
    #[serde(default)]
    pub issue: CodeAnswer,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub tenure: Option<String>,
    #[serde(default)]
    pub home_type: CodeAnswer,
    #[serde(default)]
    pub region: RegionAnswer,
    #[serde(default)]
    pub schedule: ScheduleAnswer,
}

impl Default for ChatFlowState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("incomplete chat flow state: missing {0}")]
pub struct IncompleteFlow(pub &'static str);

impl ChatFlowState {
    pub fn new() -> Self {
        Self {
            current_step: ChatFlowStep::Issue,
            issue: CodeAnswer::default(),
            last_seen: None,
            tenure: None,
            home_type: CodeAnswer::default(),
            region: RegionAnswer::default(),
            schedule: ScheduleAnswer::default(),
        }
    }

    /// Whether the given step's own required fields are filled. Each step is
    /// judged independently; later steps do not require earlier ones.
    pub fn is_step_valid(&self, step: ChatFlowStep) -> bool {
        match step {
            ChatFlowStep::Issue => self.issue.code.is_some(),
            ChatFlowStep::LastSeen => self.last_seen.is_some(),
            ChatFlowStep::Tenure => self.tenure.is_some(),
            ChatFlowStep::HomeType => self.home_type.code.is_some(),
            ChatFlowStep::Region => self.region.macro_code.is_some(),
            ChatFlowStep::Calendar => {
                self.schedule.date.is_some() && self.schedule.time_slot.is_some()
            }
            ChatFlowStep::Summary => true,
        }
    }

    /// Moves to the next step if one exists. Callers gate this on
    /// `is_step_valid(current_step)`; the machine itself never blocks.
    pub fn advance(&mut self) -> bool {
        match self.current_step.next() {
            Some(step) => {
                self.current_step = step;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        match self.current_step.prev() {
            Some(step) => {
                self.current_step = step;
                true
            }
            None => false,
        }
    }

    /// Snapshots the state into an immutable submission payload, stamping
    /// flow version, locale, source and the current time. Fails if any
    /// required field is still null.
    pub fn to_payload(&self) -> Result<ChatFlowPayload, IncompleteFlow> {
        let issue_code = self.issue.code.clone().ok_or(IncompleteFlow("issue.code"))?;
        let last_seen = self.last_seen.clone().ok_or(IncompleteFlow("lastSeen"))?;
        let tenure = self.tenure.clone().ok_or(IncompleteFlow("tenure"))?;
        let home_type_code = self
            .home_type
            .code
            .clone()
            .ok_or(IncompleteFlow("homeType.code"))?;
        let region_macro = self
            .region
            .macro_code
            .clone()
            .ok_or(IncompleteFlow("region.macro"))?;
        let date = self
            .schedule
            .date
            .clone()
            .ok_or(IncompleteFlow("schedule.date"))?;
        let time_slot = self
            .schedule
            .time_slot
            .clone()
            .ok_or(IncompleteFlow("schedule.time_slot"))?;

        Ok(ChatFlowPayload {
            flow_version: HOME_CHAT_FLOW_VERSION.to_string(),
            issue: PayloadAnswer {
                code: issue_code,
                text: self.issue.text.clone(),
            },
            last_seen,
            tenure,
            home_type: PayloadAnswer {
                code: home_type_code,
                text: self.home_type.text.clone(),
            },
            region: PayloadRegion {
                macro_code: region_macro,
                micro_code: self.region.micro_code.clone(),
                text: self.region.text.clone(),
            },
            schedule: PayloadSchedule { date, time_slot },
            meta: PayloadMeta {
                locale: PAYLOAD_LOCALE.to_string(),
                source: PAYLOAD_SOURCE.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            },
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadAnswer {
    pub code: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadRegion {
    #[serde(rename = "macro")]
    pub macro_code: String,
    #[serde(rename = "micro")]
    pub micro_code: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadSchedule {
    pub date: String,
    pub time_slot: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadMeta {
    pub locale: String,
    pub source: String,
    pub timestamp: String,
}

/// Immutable snapshot of a completed intake, the unit submitted for booking
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFlowPayload {
    pub flow_version: String,
    pub issue: PayloadAnswer,
    pub last_seen: String,
    pub tenure: String,
    pub home_type: PayloadAnswer,
    pub region: PayloadRegion,
    pub schedule: PayloadSchedule,
    pub meta: PayloadMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_state() -> ChatFlowState {
        let mut state = ChatFlowState::new();
        state.issue.code = Some("ISSUE_ROACH".to_string());
        state.last_seen = Some("SEEN_TODAY".to_string());
        state.tenure = Some("TENURE_1M".to_string());
        state.home_type.code = Some("HOME_APT".to_string());
        state.region.macro_code = Some("REGION_SEOUL".to_string());
        state.region.micro_code = Some("SEOUL_GANGNAM".to_string());
        state.schedule.date = Some("2025-09-01".to_string());
        state.schedule.time_slot = Some("14:00".to_string());
        state
    }

    #[test]
    fn test_initial_state() {
        let state = ChatFlowState::new();
        assert_eq!(state.current_step, ChatFlowStep::Issue);
        assert!(state.issue.code.is_none());
        assert!(state.last_seen.is_none());
        assert!(state.schedule.date.is_none());
    }

    #[test]
    fn test_step_order_boundaries() {
        assert!(ChatFlowStep::Issue.prev().is_none());
        assert!(ChatFlowStep::Summary.next().is_none());
        assert_eq!(ChatFlowStep::Issue.next(), Some(ChatFlowStep::LastSeen));
        assert_eq!(ChatFlowStep::Summary.prev(), Some(ChatFlowStep::Calendar));
    }

    #[test]
    fn test_next_prev_are_inverses() {
        for step in STEP_ORDER.iter().skip(1) {
            let prev = step.prev().unwrap();
            assert_eq!(prev.next(), Some(*step));
        }
    }

    #[test]
    fn test_step_validation() {
        let mut state = ChatFlowState::new();
        assert!(!state.is_step_valid(ChatFlowStep::Issue));
        state.issue.code = Some("ISSUE_ANT".to_string());
        assert!(state.is_step_valid(ChatFlowStep::Issue));

        assert!(!state.is_step_valid(ChatFlowStep::Calendar));
        state.schedule.date = Some("2025-09-01".to_string());
        assert!(!state.is_step_valid(ChatFlowStep::Calendar));
        state.schedule.time_slot = Some("09:00".to_string());
        assert!(state.is_step_valid(ChatFlowStep::Calendar));

        // Summary is terminal and always valid
        assert!(state.is_step_valid(ChatFlowStep::Summary));
    }

    #[test]
    fn test_region_valid_without_micro() {
        let mut state = ChatFlowState::new();
        state.region.macro_code = Some("REGION_GYEONGGI".to_string());
        assert!(state.is_step_valid(ChatFlowStep::Region));
    }

    #[test]
    fn test_advance_and_back_walk_the_order() {
        let mut state = ChatFlowState::new();
        let mut visited = vec![state.current_step];
        while state.advance() {
            visited.push(state.current_step);
        }
        assert_eq!(visited, STEP_ORDER.to_vec());
        assert!(!state.advance());

        while state.back() {}
        assert_eq!(state.current_step, ChatFlowStep::Issue);
        assert!(!state.back());
    }

    #[test]
    fn test_payload_requires_every_field() {
        let complete = complete_state();

        let mut missing_issue = complete.clone();
        missing_issue.issue.code = None;
        assert!(missing_issue.to_payload().is_err());

        let mut missing_last_seen = complete.clone();
        missing_last_seen.last_seen = None;
        assert!(missing_last_seen.to_payload().is_err());

        let mut missing_tenure = complete.clone();
        missing_tenure.tenure = None;
        assert!(missing_tenure.to_payload().is_err());

        let mut missing_home = complete.clone();
        missing_home.home_type.code = None;
        assert!(missing_home.to_payload().is_err());

        let mut missing_region = complete.clone();
        missing_region.region.macro_code = None;
        assert!(missing_region.to_payload().is_err());

        let mut missing_date = complete.clone();
        missing_date.schedule.date = None;
        assert!(missing_date.to_payload().is_err());

        let mut missing_slot = complete.clone();
        missing_slot.schedule.time_slot = None;
        assert!(missing_slot.to_payload().is_err());
    }

    #[test]
    fn test_payload_snapshot_matches_state() {
        let payload = complete_state().to_payload().unwrap();
        assert_eq!(payload.flow_version, HOME_CHAT_FLOW_VERSION);
        assert_eq!(payload.issue.code, "ISSUE_ROACH");
        assert_eq!(payload.last_seen, "SEEN_TODAY");
        assert_eq!(payload.tenure, "TENURE_1M");
        assert_eq!(payload.home_type.code, "HOME_APT");
        assert_eq!(payload.region.macro_code, "REGION_SEOUL");
        assert_eq!(payload.region.micro_code.as_deref(), Some("SEOUL_GANGNAM"));
        assert_eq!(payload.schedule.date, "2025-09-01");
        assert_eq!(payload.schedule.time_slot, "14:00");
        assert_eq!(payload.meta.locale, "ko-KR");
        assert_eq!(payload.meta.source, "web");
        assert!(!payload.meta.timestamp.is_empty());
    }

    #[test]
    fn test_micro_region_is_optional_in_payload() {
        let mut state = complete_state();
        state.region.macro_code = Some("REGION_INCHEON".to_string());
        state.region.micro_code = None;
        let payload = state.to_payload().unwrap();
        assert_eq!(payload.region.macro_code, "REGION_INCHEON");
        assert!(payload.region.micro_code.is_none());
    }

    #[test]
    fn test_state_serde_wire_names() {
        let state = complete_state();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentStep"], "issue");
        assert_eq!(json["lastSeen"], "SEEN_TODAY");
        assert_eq!(json["homeType"]["code"], "HOME_APT");
        assert_eq!(json["region"]["macro"], "REGION_SEOUL");
        assert_eq!(json["schedule"]["time_slot"], "14:00");

        let back: ChatFlowState = serde_json::from_value(json).unwrap();
        assert_eq!(back.current_step, ChatFlowStep::Issue);
        assert_eq!(back.region.micro_code.as_deref(), Some("SEOUL_GANGNAM"));
    }
}
