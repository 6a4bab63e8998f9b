//! Ride and participant statuses.

crate::state_enum! {
    /// Lifecycle of a ride: `ready` until it departs, `inprogress` on the
    /// road, `done` once ended.
    pub enum RideStatus {
        Ready => "ready",
        InProgress => "inprogress",
        Done => "done",
    }
    initial: Ready
    terminal: [Done]
    transitions: [
        Ready => InProgress,
        InProgress => Done,
    ]
}

crate::state_enum! {
    /// Lifecycle of a single join request.
    ///
    /// `missing`, `notmarked` and `rejected` are the unsuccessful
    /// outcomes; `done` is the successful one.
    pub enum ParticipantStatus {
        Waiting => "waiting",
        Confirmed => "confirmed",
        Rejected => "rejected",
        InProgress => "inprogress",
        Missing => "missing",
        Done => "done",
        NotMarked => "notmarked",
    }
    initial: Waiting
    terminal: [Rejected, Missing, Done, NotMarked]
    error: [Rejected, Missing, NotMarked]
    transitions: [
        Waiting => Confirmed,
        Waiting => Rejected,
        Confirmed => InProgress,
        Confirmed => Missing,
        InProgress => Done,
        InProgress => NotMarked,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Lifecycle, State};

    const ALL_PARTICIPANT: [ParticipantStatus; 7] = [
        ParticipantStatus::Waiting,
        ParticipantStatus::Confirmed,
        ParticipantStatus::Rejected,
        ParticipantStatus::InProgress,
        ParticipantStatus::Missing,
        ParticipantStatus::Done,
        ParticipantStatus::NotMarked,
    ];

    #[test]
    fn ride_status_moves_forward_only() {
        assert_eq!(RideStatus::initial(), RideStatus::Ready);
        assert!(RideStatus::Ready.can_transition(&RideStatus::InProgress));
        assert!(RideStatus::InProgress.can_transition(&RideStatus::Done));
        assert!(!RideStatus::Ready.can_transition(&RideStatus::Done));
        assert!(!RideStatus::Done.can_transition(&RideStatus::Ready));
        assert!(!RideStatus::InProgress.can_transition(&RideStatus::Ready));
    }

    #[test]
    fn participant_starts_waiting() {
        assert_eq!(ParticipantStatus::initial(), ParticipantStatus::Waiting);
    }

    #[test]
    fn participant_relation_has_six_edges() {
        let edges = ALL_PARTICIPANT
            .iter()
            .flat_map(|from| ALL_PARTICIPANT.iter().map(move |to| (from, to)))
            .filter(|(from, to)| from.can_transition(to))
            .count();
        assert_eq!(edges, 6);
    }

    #[test]
    fn terminal_participant_statuses_are_dead_ends() {
        for status in ALL_PARTICIPANT.iter().filter(|s| s.is_final()) {
            assert!(ALL_PARTICIPANT.iter().all(|next| !status.can_transition(next)));
        }
    }

    #[test]
    fn wire_names_match_views() {
        assert_eq!(RideStatus::InProgress.name(), "inprogress");
        assert_eq!(ParticipantStatus::NotMarked.name(), "notmarked");
        assert_eq!(
            serde_json::to_string(&ParticipantStatus::Missing).unwrap(),
            "\"missing\""
        );
    }

    #[test]
    fn error_outcomes_are_flagged() {
        assert!(ParticipantStatus::Rejected.is_error());
        assert!(ParticipantStatus::Missing.is_error());
        assert!(ParticipantStatus::NotMarked.is_error());
        assert!(!ParticipantStatus::Done.is_error());
        assert!(!RideStatus::Done.is_error());
    }
}
