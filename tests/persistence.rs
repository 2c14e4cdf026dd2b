mod common;

use common::{RecordingObserver, moves};
use roshambo::{
    Error, Move, Prediction, Result,
    adapters::{InMemoryRepository, MsgPackRepository},
    app::{App, PredictorKind, SessionConfig},
    policy::ArgMaxSampler,
    ports::{StatePiece, StateRepository},
    session::GameSession,
};
use tempfile::tempdir;

fn restore(app: &App, config: SessionConfig) -> GameSession {
    app.restore_session(config)
        .expect("restore succeeds")
        .with_sampler(ArgMaxSampler)
}

fn assert_restored_session_plays_identically(app: &App, config: SessionConfig) {
    let mut original = app
        .create_session(config.clone())
        .unwrap()
        .with_sampler(ArgMaxSampler);
    for mv in moves("RRPSRRPSRRPSPPSRRPSRPSS") {
        original.play_round(mv).unwrap();
    }
    original.save().unwrap();

    let mut restored = restore(app, config);
    assert_eq!(restored.history(), original.history());
    assert_eq!(restored.stats(), original.stats());
    assert_eq!(
        restored.predictor().retrain_count(),
        original.predictor().retrain_count()
    );

    for mv in moves("RPSSRPRRSPPSRPS") {
        let a = original.play_round(mv).unwrap();
        let b = restored.play_round(mv).unwrap();
        assert_eq!(a.prediction, b.prediction, "round {}", a.round);
        assert_eq!(a.bot_move, b.bot_move, "round {}", a.round);
        assert_eq!(a.retrained, b.retrained);
    }
}

#[test]
fn markov_session_survives_a_state_directory_round_trip() {
    let dir = tempdir().unwrap();
    let app = App::with_state_dir(dir.path());
    assert_restored_session_plays_identically(&app, SessionConfig::default().with_seed(1));

    for piece in StatePiece::ALL {
        assert!(dir.path().join(format!("{}.msgpack", piece.key())).exists());
    }
}

#[test]
fn sequence_session_survives_an_in_memory_round_trip() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .with_default_seed(9)
        .build();
    assert_restored_session_plays_identically(&app, SessionConfig::new(PredictorKind::Sequence));
}

#[test]
fn corrupt_history_degrades_to_empty_while_model_survives() {
    let repo = InMemoryRepository::new();
    let recorder = RecordingObserver::default();
    let observer = recorder.clone();
    let app = App::for_testing()
        .with_repository(repo.clone())
        .with_observer(move || Box::new(observer.clone()))
        .build();

    let mut session = restore(&app, SessionConfig::default());
    for mv in moves("RPSRPSRPSR") {
        session.play_round(mv).unwrap();
    }
    assert_eq!(recorder.count("persistence failure"), 0);

    repo.corrupt(StatePiece::History, &[0xff, 0x00, 0x13]);
    let restored = restore(&app, SessionConfig::default());

    assert!(restored.history().is_empty());
    assert_eq!(restored.stats().games_played, 10);
    assert_eq!(restored.predictor().retrain_count(), 1);
    assert_eq!(recorder.count("persistence failure"), 1);
}

#[test]
fn unreadable_model_is_refit_from_restored_history() {
    let dir = tempdir().unwrap();
    let app = App::with_state_dir(dir.path());
    let mut session = restore(&app, SessionConfig::default());
    for mv in moves("SSSSSSSSSSSSSSS") {
        session.play_round(mv).unwrap();
    }
    session.save().unwrap();

    std::fs::write(dir.path().join("model.msgpack"), b"truncated").unwrap();
    let mut restored = restore(&app, SessionConfig::default());
    assert_eq!(restored.history().len(), 15);
    assert_eq!(restored.predictor().retrain_count(), 1);

    let next = restored.play_round(Move::Scissors).unwrap();
    assert_eq!(next.prediction, Prediction::Move(Move::Scissors));
    assert_eq!(next.bot_move, Move::Rock);
}

struct ReadOnlyRepository;

impl StateRepository for ReadOnlyRepository {
    fn write(&self, piece: StatePiece, _bytes: &[u8]) -> Result<()> {
        Err(Error::Io {
            operation: format!("write {piece}"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn read(&self, _piece: StatePiece) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
}

#[test]
fn failed_save_is_reported_and_play_continues() {
    let recorder = RecordingObserver::default();
    let observer = recorder.clone();
    let app = App::for_testing()
        .with_repository(ReadOnlyRepository)
        .with_observer(move || Box::new(observer.clone()))
        .build();

    let mut session = restore(&app, SessionConfig::default());
    for mv in moves("RPSRPSRPSRPS") {
        session.play_round(mv).unwrap();
    }

    assert_eq!(session.stats().games_played, 12);
    // One report per failed save, not per piece.
    assert_eq!(recorder.count("persistence failure"), 1);
    assert!(session.save().unwrap_err().is_persistence());
}

#[test]
fn missing_directory_is_created_on_first_save() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("players").join("alice");
    let repo = MsgPackRepository::new(&nested);

    repo.write(StatePiece::Stats, b"\x90").unwrap();
    assert_eq!(repo.read(StatePiece::Stats).unwrap(), Some(vec![0x90]));
    assert_eq!(repo.read(StatePiece::Model).unwrap(), None);
}
