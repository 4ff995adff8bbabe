//! Integration tests: AppService → catalogs → ports.

use core::time::Duration;

use errback::Error;
use errback::adapters::timer::{ManualTimer, ThreadTimer};
use errback::app::commands::AppCommand;
use errback::app::events::AppEvent;
use errback::app::ports::TimerError;
use errback::app::service::{AppService, MAX_IN_FLIGHT, Outcome};
use errback::config::AppConfig;
use futures_lite::future::{block_on, zip};

use super::mock_ports::{MockEnv, MockProcess, RecordingSink};

fn service_with(config: &AppConfig, env: &MockEnv) -> (AppService<ManualTimer>, ManualTimer) {
    let timer = ManualTimer::new();
    (AppService::new(config, env, timer.clone()), timer)
}

#[test]
fn stock_scenario_reports_then_exits_on_failure() {
    let env = MockEnv::new().with_args(&["errback-demo"]);
    let config = AppConfig::default();
    let (svc, timer) = service_with(&config, &env);
    let mut sink = RecordingSink::new();
    let mut process = MockProcess::new();

    svc.announce(&mut sink);
    let cmds = AppCommand::from_args(&env.args, &config);
    let runs = futures_lite::future::block_on(async {
        let mut pending: Vec<_> = cmds.into_iter().map(|c| Box::pin(svc.run(c))).collect();
        // Start every lookup, then let the timer complete them.
        for run in &mut pending {
            assert!(futures_lite::future::poll_once(run).await.is_none());
        }
        assert_eq!(timer.pending(), 3);
        timer.fire_all();
        let mut outcomes = Vec::new();
        for run in pending {
            outcomes.push(run.await);
        }
        outcomes
    });

    for outcome in runs {
        svc.report(outcome, &mut sink, &mut process);
    }

    assert_eq!(
        sink.names(),
        vec!["started", "trail-found", "user-found", "lookup-failed", "exiting"]
    );
    assert_eq!(process.exit_codes, vec![1]);
    assert!(sink.events.contains(&AppEvent::LookupFailed {
        subject: "user 1".into(),
        reason: "User not found".into(),
    }));
}

#[test]
fn successful_lookups_never_exit() {
    let env = MockEnv::new();
    let (svc, timer) = service_with(&AppConfig::default(), &env);
    let mut sink = RecordingSink::new();
    let mut process = MockProcess::new();

    let both = zip(
        svc.run(AppCommand::FindUser(5)),
        svc.run(AppCommand::FindTrail("Pacific Crest".into())),
    );
    let mut both = Box::pin(both);
    assert!(block_on(futures_lite::future::poll_once(&mut both)).is_none());
    timer.fire_all_reversed();
    let (user, trail) = block_on(both);

    assert!(user.is_ok() && trail.is_ok());
    assert!(svc.report(user, &mut sink, &mut process));
    assert!(svc.report(trail, &mut sink, &mut process));
    assert!(!process.exited());
}

#[test]
fn timeout_failure_is_reported_as_timed_out() {
    let env = MockEnv::new();
    let config = AppConfig {
        lookup_delay_ms: 500,
        lookup_timeout_ms: Some(100),
        ..AppConfig::default()
    };
    let (svc, timer) = service_with(&config, &env);
    let mut run = Box::pin(svc.run(AppCommand::FindUser(5)));
    assert!(block_on(futures_lite::future::poll_once(&mut run)).is_none());
    assert_eq!(
        timer.delays(),
        vec![Duration::from_millis(500), Duration::from_millis(100)]
    );

    assert!(timer.fire_next());
    let outcome = block_on(run);
    assert_eq!(
        outcome,
        Outcome::User {
            id: 5,
            result: Err(Error::TimedOut)
        }
    );

    let mut sink = RecordingSink::new();
    let mut process = MockProcess::new();
    svc.report(outcome, &mut sink, &mut process);
    assert_eq!(process.exit_codes, vec![1]);
    assert!(sink.events.contains(&AppEvent::LookupFailed {
        subject: "user 5".into(),
        reason: "timed out".into(),
    }));
}

#[test]
fn refused_timer_is_a_setup_failure() {
    let env = MockEnv::new();
    let (svc, timer) = service_with(&AppConfig::default(), &env);
    timer.shutdown();

    let outcome = block_on(svc.run(AppCommand::FindTrail("North Country".into())));
    let Outcome::Trail { result, .. } = &outcome else {
        panic!("expected a trail outcome");
    };
    assert!(matches!(result, Err(Error::Timer(_))));

    let mut sink = RecordingSink::new();
    let mut process = MockProcess::new();
    assert!(!svc.report(outcome, &mut sink, &mut process));
    let expected = Error::Timer(TimerError::Shutdown).exit_code();
    assert_eq!(process.exit_codes, vec![expected]);
}

#[test]
fn development_env_is_announced() {
    let env = MockEnv::new().with_var("APP_ENV", "development");
    let (svc, _timer) = service_with(&AppConfig::default(), &env);
    let mut sink = RecordingSink::new();
    svc.announce(&mut sink);
    assert_eq!(sink.events, vec![AppEvent::Started { development: true }]);
}

#[test]
fn run_all_handles_more_lookups_than_executor_capacity() {
    let env = MockEnv::new();
    let config = AppConfig {
        lookup_delay_ms: 0,
        ..AppConfig::default()
    };
    let svc = AppService::new(&config, &env, ThreadTimer::new());

    let total = MAX_IN_FLIGHT * 2 + 1;
    let mut cmds: Vec<_> = (0..total - 1).map(|_| AppCommand::FindUser(5)).collect();
    cmds.push(AppCommand::FindUser(1));

    let outcomes = svc.run_all(cmds);
    assert_eq!(outcomes.len(), total);
    assert!(outcomes[..total - 1].iter().all(Outcome::is_ok));
    assert!(matches!(
        outcomes[total - 1],
        Outcome::User { id: 1, result: Err(Error::Lookup(_)) }
    ));
}

#[test]
fn run_all_keeps_command_order() {
    let env = MockEnv::new();
    let config = AppConfig {
        lookup_delay_ms: 0,
        ..AppConfig::default()
    };
    let svc = AppService::new(&config, &env, ThreadTimer::new());

    let outcomes = svc.run_all(vec![
        AppCommand::FindTrail("Appalachian".into()),
        AppCommand::FindUser(5),
        AppCommand::FindTrail("Nowhere".into()),
    ]);
    let oks: Vec<bool> = outcomes.iter().map(Outcome::is_ok).collect();
    assert_eq!(oks, vec![true, true, false]);
    assert!(matches!(&outcomes[0], Outcome::Trail { name, .. } if name == "Appalachian"));
}
