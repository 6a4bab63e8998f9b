//! End-to-end ride scenarios driven through `RideService`.

use carpool::ride::{ParticipantStatus, RideId, RideStatus};
use carpool::{
    ErrorKind, ErrorResponse, JoinRequest, NewUser, RideDetails, RideError, RideService, SeedData,
    StartRide, UnloadRequest,
};
use std::sync::Arc;
use std::thread;

fn register(service: &RideService, alias: &str) {
    service
        .register_user(NewUser {
            alias: alias.to_string(),
            name: alias.to_uppercase(),
            car_plate: None,
        })
        .unwrap();
}

fn service_with(aliases: &[&str]) -> RideService {
    let service: RideService = RideService::default();
    register(&service, "driver");
    for alias in aliases {
        register(&service, alias);
    }
    service
}

fn publish(service: &RideService, seats: u32) -> RideId {
    service
        .create_ride(
            "driver",
            RideDetails {
                ride_date_and_time: "2025/07/15 22:00".to_string(),
                final_address: "Av Javier Prado 456, San Borja".to_string(),
                available_spaces: seats,
            },
        )
        .unwrap()
        .id
}

fn join(service: &RideService, id: RideId, alias: &str, seats: u32) -> Result<(), RideError> {
    service.request_to_join(
        "driver",
        id,
        alias,
        JoinRequest {
            destination: format!("{alias}'s place"),
            occupied_spaces: seats,
        },
    )
}

fn status_of(service: &RideService, id: RideId, alias: &str) -> ParticipantStatus {
    service
        .get_ride("driver", id)
        .unwrap()
        .participants
        .into_iter()
        .find(|p| p.participant.alias == alias)
        .map(|p| p.status)
        .unwrap()
}

#[test]
fn two_seat_ride_from_request_to_drop_off() {
    let service = service_with(&["ana", "beto"]);
    let id = publish(&service, 2);

    join(&service, id, "ana", 1).unwrap();
    join(&service, id, "beto", 2).unwrap();

    service.accept_participant("driver", id, "ana").unwrap();
    let err = service.accept_participant("driver", id, "beto").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(status_of(&service, id, "beto"), ParticipantStatus::Waiting);

    service.reject_participant("driver", id, "beto").unwrap();

    let outcome = service
        .start_ride(
            "driver",
            id,
            StartRide {
                present_participants: vec!["ana".to_string()],
            },
        )
        .unwrap();
    assert_eq!(outcome.boarded, vec!["ana".to_string()]);
    assert!(outcome.missing.is_empty());
    assert_eq!(status_of(&service, id, "ana"), ParticipantStatus::InProgress);

    service
        .unload_participant(
            "driver",
            id,
            UnloadRequest {
                participant_alias: "ana".to_string(),
            },
        )
        .unwrap();
    assert_eq!(status_of(&service, id, "ana"), ParticipantStatus::Done);

    assert!(service.end_ride("driver", id).unwrap().is_empty());
    let ride = service.get_ride("driver", id).unwrap();
    assert_eq!(ride.status, RideStatus::Done);
    assert_eq!(status_of(&service, id, "ana"), ParticipantStatus::Done);
    assert_eq!(status_of(&service, id, "beto"), ParticipantStatus::Rejected);

    let ana = service.statistics("ana").unwrap();
    assert_eq!(ana.previous_rides_total, 1);
    assert_eq!(ana.previous_rides_completed, 1);
    let beto = service.statistics("beto").unwrap();
    assert_eq!(beto.previous_rides_rejected, 1);
}

#[test]
fn join_after_departure_is_invalid_state() {
    let service = service_with(&["ana"]);
    let id = publish(&service, 2);
    service
        .start_ride("driver", id, StartRide::default())
        .unwrap();

    let err = join(&service, id, "ana", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(err.status_code(), 422);
    assert!(service.get_ride("driver", id).unwrap().participants.is_empty());
    assert_eq!(service.statistics("ana").unwrap().previous_rides_total, 0);
}

#[test]
fn duplicate_join_keeps_the_first_request() {
    let service = service_with(&["ana"]);
    let id = publish(&service, 3);
    join(&service, id, "ana", 1).unwrap();
    service.accept_participant("driver", id, "ana").unwrap();

    let err = join(&service, id, "ana", 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let ride = service.get_ride("driver", id).unwrap();
    assert_eq!(ride.participants.len(), 1);
    assert_eq!(ride.participants[0].occupied_spaces, 1);
    assert_eq!(ride.participants[0].status, ParticipantStatus::Confirmed);
}

#[test]
fn start_waits_for_every_decision() {
    let service = service_with(&["ana", "beto"]);
    let id = publish(&service, 4);
    join(&service, id, "ana", 1).unwrap();
    join(&service, id, "beto", 1).unwrap();
    service.accept_participant("driver", id, "ana").unwrap();

    let err = service
        .start_ride("driver", id, StartRide::default())
        .unwrap_err();
    assert_eq!(
        err,
        RideError::PendingRequests {
            ride: id,
            waiting: 1
        }
    );
    assert_eq!(service.get_ride("driver", id).unwrap().status, RideStatus::Ready);
    assert_eq!(status_of(&service, id, "ana"), ParticipantStatus::Confirmed);
}

#[test]
fn absent_and_unmarked_passengers_are_tallied() {
    let service = service_with(&["ana", "beto"]);
    let id = publish(&service, 2);
    join(&service, id, "ana", 1).unwrap();
    join(&service, id, "beto", 1).unwrap();
    service.accept_participant("driver", id, "ana").unwrap();
    service.accept_participant("driver", id, "beto").unwrap();

    let outcome = service
        .start_ride(
            "driver",
            id,
            StartRide {
                present_participants: vec!["beto".to_string(), "stranger".to_string()],
            },
        )
        .unwrap();
    assert_eq!(outcome.missing, vec!["ana".to_string()]);

    assert_eq!(
        service.end_ride("driver", id).unwrap(),
        vec!["beto".to_string()]
    );
    assert_eq!(service.statistics("ana").unwrap().previous_rides_missing, 1);
    assert_eq!(
        service.statistics("beto").unwrap().previous_rides_not_marked,
        1
    );

    let err = service
        .unload_participant(
            "driver",
            id,
            UnloadRequest {
                participant_alias: "beto".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn second_unload_is_invalid_state() {
    let service = service_with(&["ana"]);
    let id = publish(&service, 1);
    join(&service, id, "ana", 1).unwrap();
    service.accept_participant("driver", id, "ana").unwrap();
    service
        .start_ride(
            "driver",
            id,
            StartRide {
                present_participants: vec!["ana".to_string()],
            },
        )
        .unwrap();

    let unload = || {
        service.unload_participant(
            "driver",
            id,
            UnloadRequest {
                participant_alias: "ana".to_string(),
            },
        )
    };
    unload().unwrap();
    let err = unload().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(status_of(&service, id, "ana"), ParticipantStatus::Done);
}

#[test]
fn unknown_entities_are_not_found() {
    let service = service_with(&["ana"]);
    let missing = RideId::new(42);

    let err = service.get_ride("driver", missing).unwrap_err();
    assert_eq!(err, RideError::RideNotFound { id: missing });
    assert_eq!(err.status_code(), 404);

    let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
    assert_eq!(body["code"], "not_found");

    assert_eq!(
        service.statistics("ghost").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn invalid_join_reports_every_problem() {
    let service = service_with(&["ana"]);
    let id = publish(&service, 2);
    let err = service
        .request_to_join(
            "driver",
            id,
            "ana",
            JoinRequest {
                destination: " ".to_string(),
                occupied_spaces: 0,
            },
        )
        .unwrap_err();
    match err {
        RideError::InvalidRequest { violations } => assert_eq!(violations.len(), 2),
        other => panic!("expected invalid request, got {other:?}"),
    }
}

#[test]
fn demo_seed_matches_reference_data() {
    let service = RideService::in_memory(&SeedData::demo()).unwrap();
    let users = service.list_users();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].car_plate.as_deref(), Some("ABC123"));

    let ride = service.get_ride("jperez", RideId::new(1)).unwrap();
    assert_eq!(ride.final_address, "Av Javier Prado 456, San Borja");
    assert_eq!(ride.participants[0].participant.alias, "lgomez");
    assert_eq!(ride.participants[0].status, ParticipantStatus::Waiting);
    assert_eq!(ride.participants[0].confirmation, None);
}

#[test]
fn concurrent_accepts_never_overbook() {
    let passengers: Vec<String> = (0..8).map(|n| format!("rider{n}")).collect();
    let aliases: Vec<&str> = passengers.iter().map(String::as_str).collect();
    let service = Arc::new(service_with(&aliases));
    let id = publish(&service, 3);
    for alias in &aliases {
        join(&service, id, alias, 1).unwrap();
    }

    let handles: Vec<_> = passengers
        .iter()
        .cloned()
        .map(|alias| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.accept_participant("driver", id, &alias).is_ok())
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 3);
    let confirmed = service
        .get_ride("driver", id)
        .unwrap()
        .participants
        .iter()
        .filter(|p| p.status == ParticipantStatus::Confirmed)
        .count();
    assert_eq!(confirmed, 3);
}
