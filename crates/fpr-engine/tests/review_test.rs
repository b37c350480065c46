//! End-to-end engine tests with in-memory oracles.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{
    compliant, registry, rule, violated, RecordingScanner, Reply, ScriptedFrames, ScriptedJudge,
    SlowFrames, TimedJudge,
};
use fpr_core::{RuleRegistry, NO_RELATED_CONTENT};
use fpr_engine::{ComplianceReview, FanOutScheduler, RetryPolicy, ReviewError, ReviewInput};

fn fast_policy() -> RetryPolicy {
    RetryPolicy::default().with_delay(Duration::from_millis(1))
}

fn transcript(text: &str) -> ReviewInput {
    ReviewInput {
        transcript: text.to_string(),
        frames: None,
    }
}

#[tokio::test]
async fn sentinel_violation_scenario() {
    let registry = Arc::new(registry(vec![
        rule("R1", &["H1"]),
        rule("R2", &["H1", "H2"]),
    ]));
    let judge = Arc::new(
        ScriptedJudge::new()
            .script("R1", vec![violated(&[NO_RELATED_CONTENT], &[])])
            .script("R2", vec![compliant()]),
    );
    let review = ComplianceReview::new(registry, judge).with_policy(fast_policy());

    let report = review.run(transcript("Buy now!")).await.unwrap();
    let json = serde_json::to_value(&report.transcript_review).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "violated_handbooks": ["H1"],
            "violated_rules": ["R1"],
            "per_handbook_status": {
                "H1": {
                    "R1": { "evidence": [NO_RELATED_CONTENT], "suggestions": [] },
                    "R2": "Respected"
                },
                "H2": { "R2": "Respected" }
            }
        })
    );
    assert!(report.is_complete());
    assert!(report.video_review.is_none());
}

#[tokio::test]
async fn retry_bound_fail_fail_succeed_is_three_calls() {
    let judge = Arc::new(
        ScriptedJudge::new().script("R1", vec![Reply::Fail, Reply::Fail, compliant()]),
    );
    let scheduler = FanOutScheduler::new(judge.clone()).with_policy(fast_policy());
    let rules = vec![Arc::new(rule("R1", &["H1"]))];

    let outcomes = scheduler.run_all(&rules, Arc::from("doc")).await;

    assert_eq!(judge.calls("R1"), 3);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].attempts(), 3);
    assert!(outcomes[0].verdict().unwrap().compliant);
}

#[tokio::test]
async fn exhausted_rule_is_fail_open_and_listed() {
    let registry = Arc::new(registry(vec![
        rule("R1", &["H1"]),
        rule("R2", &["H1"]),
    ]));
    let judge = Arc::new(
        ScriptedJudge::new()
            .script("R1", vec![Reply::Fail])
            .script("R2", vec![violated(&["risk-free"], &["remove risk-free"])]),
    );
    let review = ComplianceReview::new(registry, judge.clone())
        .with_policy(fast_policy().with_max_retries(2));

    let report = review.run(transcript("risk-free returns")).await.unwrap();

    assert_eq!(judge.calls("R1"), 3);
    let tr = &report.transcript_review;
    assert!(tr.status("H1", "R1").unwrap().is_respected());
    assert!(!tr.violated_rules().iter().any(|r| r.as_str() == "R1"));
    assert!(tr.violated_rules().iter().any(|r| r.as_str() == "R2"));

    assert!(!report.is_complete());
    assert_eq!(report.unevaluated_rules.len(), 1);
    assert_eq!(report.unevaluated_rules[0].rule_name.as_str(), "R1");
    assert_eq!(report.unevaluated_rules[0].attempts, 3);
    assert!(report.unevaluated_rules[0].last_error.contains("scripted failure"));
}

#[tokio::test]
async fn rule_outcomes_are_independent() {
    let rules = vec![
        Arc::new(rule("A", &["H"])),
        Arc::new(rule("B", &["H"])),
        Arc::new(rule("C", &["H"])),
    ];
    let baseline = Arc::new(ScriptedJudge::new().script("B", vec![violated(&["x"], &["y"])]));
    let noisy = Arc::new(
        ScriptedJudge::new()
            .script("A", vec![Reply::Fail])
            .script("B", vec![violated(&["x"], &["y"])])
            .script("C", vec![Reply::Fail, Reply::Fail, compliant()]),
    );

    let policy = fast_policy().with_max_retries(1);
    let a = FanOutScheduler::new(baseline)
        .with_policy(policy.clone())
        .run_all(&rules, Arc::from("doc"))
        .await;
    let b = FanOutScheduler::new(noisy)
        .with_policy(policy)
        .run_all(&rules, Arc::from("doc"))
        .await;

    // B's verdict is unaffected by A failing and C exhausting its retries.
    assert_eq!(a[1].verdict(), b[1].verdict());
    assert!(b[0].is_failed());
    assert!(b[2].is_failed());
    assert_eq!(b.iter().map(|o| o.rule_name().as_str()).collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn deadline_turns_hanging_rules_into_failures() {
    let rules = vec![Arc::new(rule("fast", &["H"])), Arc::new(rule("stuck", &["H"]))];
    let judge = Arc::new(ScriptedJudge::new().script("stuck", vec![Reply::Hang]));
    let scheduler = FanOutScheduler::new(judge)
        .with_policy(fast_policy().with_deadline(Duration::from_millis(100)));

    let outcomes = scheduler.run_all(&rules, Arc::from("doc")).await;

    assert!(outcomes[0].verdict().unwrap().compliant);
    match &outcomes[1] {
        fpr_core::EvaluationOutcome::Failed { last_error, .. } => {
            assert!(last_error.contains("deadline"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn attempt_timeout_lets_retries_recover() {
    let judge = Arc::new(ScriptedJudge::new().script("R", vec![Reply::Hang, compliant()]));
    let scheduler = FanOutScheduler::new(judge.clone()).with_policy(
        fast_policy().with_attempt_timeout(Duration::from_millis(20)),
    );
    let outcomes = scheduler
        .run_all(&[Arc::new(rule("R", &["H"]))], Arc::from("doc"))
        .await;

    assert_eq!(judge.calls("R"), 2);
    assert!(outcomes[0].verdict().unwrap().compliant);
}

#[tokio::test]
async fn concurrency_limit_still_evaluates_every_rule() {
    let registry = RuleRegistry::fca_default().unwrap();
    let judge = Arc::new(ScriptedJudge::new());
    let scheduler = FanOutScheduler::new(judge.clone())
        .with_policy(fast_policy())
        .with_concurrency_limit(2);

    let outcomes = scheduler.run_all(registry.rules(), Arc::from("doc")).await;

    assert_eq!(outcomes.len(), registry.len());
    assert_eq!(judge.total_calls() as usize, registry.len());
    assert!(outcomes.iter().all(|o| !o.is_failed()));
}

#[tokio::test]
async fn every_rule_is_in_flight_at_once() {
    let rules: Vec<_> = (1..=7)
        .map(|i| Arc::new(rule(&format!("R{i}"), &["H"])))
        .collect();
    let judge = Arc::new(TimedJudge::new(
        ScriptedJudge::new(),
        Duration::from_millis(200),
    ));

    let started = Instant::now();
    let outcomes = FanOutScheduler::new(judge.clone())
        .with_policy(fast_policy())
        .run_all(&rules, Arc::from("doc"))
        .await;

    assert_eq!(outcomes.len(), 7);
    assert_eq!(judge.peak_in_flight(), 7);
    // One oracle round trip, not seven.
    assert!(started.elapsed() < Duration::from_millis(1000));
}

#[tokio::test]
async fn retry_delay_does_not_hold_back_other_rules() {
    let rules = vec![
        Arc::new(rule("slow", &["H"])),
        Arc::new(rule("fast", &["H"])),
    ];
    let judge = Arc::new(TimedJudge::new(
        ScriptedJudge::new().script("slow", vec![Reply::Fail, compliant()]),
        Duration::ZERO,
    ));

    let outcomes = FanOutScheduler::new(judge.clone())
        .with_policy(RetryPolicy::default().with_delay(Duration::from_millis(300)))
        .run_all(&rules, Arc::from("doc"))
        .await;

    assert!(outcomes.iter().all(|o| !o.is_failed()));
    let order = judge.call_order();
    assert_eq!(order.len(), 3);
    let fast_first = order.iter().position(|r| r == "fast").unwrap();
    let slow_retry = order.iter().rposition(|r| r == "slow").unwrap();
    assert!(fast_first < slow_retry, "call order was {order:?}");
}

#[tokio::test]
async fn transcript_and_video_paths_overlap() {
    let latency = Duration::from_millis(300);
    let review = ComplianceReview::new(
        Arc::new(registry(vec![rule("R1", &["H1"])])),
        Arc::new(TimedJudge::new(ScriptedJudge::new(), latency)),
    )
    .with_video(
        Arc::new(SlowFrames {
            latency,
            text: "Capital at risk".into(),
        }),
        Arc::new(RecordingScanner::default()),
    )
    .with_policy(fast_policy());

    let started = Instant::now();
    let report = review
        .run(ReviewInput {
            transcript: "Invest in Acme".into(),
            frames: Some(vec![vec![1]]),
        })
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(report.video_review.unwrap().disclaimer.unwrap().disclaimer_is_exist);
    assert!(elapsed >= latency);
    // Sequential paths would take at least twice the latency.
    assert!(elapsed < latency * 2 - Duration::from_millis(50), "took {elapsed:?}");
}

#[tokio::test]
async fn empty_transcript_is_rejected_before_dispatch() {
    let judge = Arc::new(ScriptedJudge::new());
    let review = ComplianceReview::new(Arc::new(RuleRegistry::fca_default().unwrap()), judge.clone());

    let err = review.run(transcript("   \n")).await.unwrap_err();
    assert!(matches!(err, ReviewError::EmptyTranscript));
    assert_eq!(judge.total_calls(), 0);
}

#[tokio::test]
async fn frames_without_video_capabilities_are_rejected() {
    let judge = Arc::new(ScriptedJudge::new());
    let review = ComplianceReview::new(Arc::new(RuleRegistry::fca_default().unwrap()), judge);

    let err = review
        .run(ReviewInput {
            transcript: "text".into(),
            frames: Some(vec![vec![1]]),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::VideoUnsupported));
}

#[tokio::test]
async fn video_path_skips_blank_and_failed_frames() {
    let frames = ScriptedFrames {
        answers: HashMap::from([
            (1, Ok(Some("Invest in Acme".to_string()))),
            (2, Ok(None)),
            (3, Err(())),
            (4, Ok(Some("Capital at risk".to_string()))),
        ]),
    };
    let scanner = Arc::new(RecordingScanner::default());
    let review = ComplianceReview::new(
        Arc::new(registry(vec![rule("R1", &["H1"])])),
        Arc::new(ScriptedJudge::new()),
    )
    .with_video(Arc::new(frames), scanner.clone())
    .with_policy(fast_policy());

    let report = review
        .run(ReviewInput {
            transcript: "Invest in Acme today".into(),
            frames: Some(vec![vec![1], vec![2], vec![3], vec![4]]),
        })
        .await
        .unwrap();

    let video = report.video_review.unwrap();
    assert_eq!(video.frames_scanned, 4);
    assert_eq!(video.frames_with_text, 2);
    let disclaimer = video.disclaimer.unwrap();
    assert!(disclaimer.disclaimer_is_exist);
    assert_eq!(disclaimer.disclaimer_text, "Capital at risk");
    assert_eq!(
        scanner.seen.lock().unwrap().clone(),
        vec![vec!["Invest in Acme".to_string(), "Capital at risk".to_string()]]
    );
}

#[tokio::test]
async fn failed_disclaimer_scan_is_reported_as_null() {
    let frames = ScriptedFrames {
        answers: HashMap::from([(1, Ok(Some("Invest".to_string())))]),
    };
    let scanner = Arc::new(RecordingScanner {
        fail: true,
        ..Default::default()
    });
    let review = ComplianceReview::new(
        Arc::new(registry(vec![rule("R1", &["H1"])])),
        Arc::new(ScriptedJudge::new()),
    )
    .with_video(Arc::new(frames), scanner);

    let report = review
        .run(ReviewInput {
            transcript: "text".into(),
            frames: Some(vec![vec![1]]),
        })
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["video_review"]["disclaimer"].is_null());
    assert_eq!(json["video_review"]["frames_with_text"], 1);
    assert!(json["transcript_digest"].as_str().unwrap().starts_with("sha256:"));
    assert!(json["run_id"].is_string());
}

#[tokio::test]
async fn frames_without_text_skip_the_scan() {
    let frames = ScriptedFrames {
        answers: HashMap::new(),
    };
    let scanner = Arc::new(RecordingScanner::default());
    let review = ComplianceReview::new(
        Arc::new(registry(vec![rule("R1", &["H1"])])),
        Arc::new(ScriptedJudge::new()),
    )
    .with_video(Arc::new(frames), scanner.clone());

    let report = review
        .run(ReviewInput {
            transcript: "text".into(),
            frames: Some(vec![vec![9], vec![8]]),
        })
        .await
        .unwrap();

    let video = report.video_review.unwrap();
    assert_eq!(video.frames_with_text, 0);
    assert_eq!(video.disclaimer, Some(fpr_oracle::DisclaimerFinding::absent()));
    assert!(scanner.seen.lock().unwrap().is_empty());
}
