//! In-memory oracles for engine integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fpr_core::{HandbookId, Rule, RuleName, RuleRegistry};
use fpr_oracle::{
    DisclaimerFinding, DisclaimerScanner, FrameReader, JudgeRequest, JudgmentOracle,
    JudgmentResponse, OracleError,
};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Answer(JudgmentResponse),
    Fail,
    Hang,
}

pub fn compliant() -> Reply {
    Reply::Answer(JudgmentResponse {
        rule_name: None,
        label: true,
        part: vec![],
        suggestion: vec![],
    })
}

pub fn violated(part: &[&str], suggestion: &[&str]) -> Reply {
    Reply::Answer(JudgmentResponse {
        rule_name: None,
        label: false,
        part: part.iter().map(|s| s.to_string()).collect(),
        suggestion: suggestion.iter().map(|s| s.to_string()).collect(),
    })
}

pub fn oracle_failure() -> OracleError {
    OracleError::Schema {
        endpoint: "scripted".into(),
        reason: "scripted failure".into(),
    }
}

/// Judgment oracle answering per rule from a queue. Once a rule's queue is
/// empty its last reply repeats; unscripted rules are compliant.
#[derive(Default)]
pub struct ScriptedJudge {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    last: Mutex<HashMap<String, Reply>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl ScriptedJudge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, rule: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(rule.to_string(), replies.into());
        self
    }

    pub fn calls(&self, rule: &str) -> u32 {
        self.calls.lock().unwrap().get(rule).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    fn next_reply(&self, rule: &str) -> Reply {
        *self.calls.lock().unwrap().entry(rule.to_string()).or_default() += 1;
        let queued = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(rule)
            .and_then(VecDeque::pop_front);
        let mut last = self.last.lock().unwrap();
        match queued {
            Some(reply) => {
                last.insert(rule.to_string(), reply.clone());
                reply
            }
            None => last.get(rule).cloned().unwrap_or_else(compliant),
        }
    }
}

#[async_trait]
impl JudgmentOracle for ScriptedJudge {
    async fn judge(&self, request: JudgeRequest<'_>) -> Result<JudgmentResponse, OracleError> {
        match self.next_reply(request.rule.name().as_str()) {
            Reply::Answer(mut response) => {
                response.rule_name = Some(request.rule.name().to_string());
                Ok(response)
            }
            Reply::Fail => Err(oracle_failure()),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// Wraps a [`ScriptedJudge`] with a fixed latency per call and records when
/// each call started and how many were in flight at once.
pub struct TimedJudge {
    inner: ScriptedJudge,
    latency: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    started: Mutex<Vec<(String, Instant)>>,
}

impl TimedJudge {
    pub fn new(inner: ScriptedJudge, latency: Duration) -> Self {
        Self {
            inner,
            latency,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
        }
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Rule names in the order their calls started.
    pub fn call_order(&self) -> Vec<String> {
        self.started
            .lock()
            .unwrap()
            .iter()
            .map(|(rule, _)| rule.clone())
            .collect()
    }
}

#[async_trait]
impl JudgmentOracle for TimedJudge {
    async fn judge(&self, request: JudgeRequest<'_>) -> Result<JudgmentResponse, OracleError> {
        self.started
            .lock()
            .unwrap()
            .push((request.rule.name().to_string(), Instant::now()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.judge(request).await
    }
}

/// Frame reader that takes `latency` per frame and always sees `text`.
pub struct SlowFrames {
    pub latency: Duration,
    pub text: String,
}

#[async_trait]
impl FrameReader for SlowFrames {
    async fn read_frame(&self, _jpeg: &[u8]) -> Result<Option<String>, OracleError> {
        tokio::time::sleep(self.latency).await;
        Ok(Some(self.text.clone()))
    }
}

/// Frame reader returning a fixed answer per frame index, keyed by the
/// first byte of the frame.
pub struct ScriptedFrames {
    pub answers: HashMap<u8, Result<Option<String>, ()>>,
}

#[async_trait]
impl FrameReader for ScriptedFrames {
    async fn read_frame(&self, jpeg: &[u8]) -> Result<Option<String>, OracleError> {
        let key = jpeg.first().copied().unwrap_or_default();
        match self.answers.get(&key) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(())) => Err(oracle_failure()),
            None => Ok(None),
        }
    }
}

/// Disclaimer scanner that records what it was given.
#[derive(Default)]
pub struct RecordingScanner {
    pub fail: bool,
    pub seen: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl DisclaimerScanner for RecordingScanner {
    async fn scan(&self, frame_texts: &[String]) -> Result<DisclaimerFinding, OracleError> {
        self.seen.lock().unwrap().push(frame_texts.to_vec());
        if self.fail {
            return Err(oracle_failure());
        }
        Ok(frame_texts
            .iter()
            .find(|t| t.to_lowercase().contains("capital at risk"))
            .map(|t| DisclaimerFinding {
                disclaimer_is_exist: true,
                disclaimer_text: t.clone(),
            })
            .unwrap_or_else(DisclaimerFinding::absent))
    }
}

pub fn rule(name: &str, handbooks: &[&str]) -> Rule {
    Rule::new(
        RuleName::new(name).unwrap(),
        handbooks.iter().map(|h| HandbookId::new(*h).unwrap()),
        format!("{name} must be respected."),
    )
    .unwrap()
}

pub fn registry(rules: Vec<Rule>) -> RuleRegistry {
    RuleRegistry::from_rules(rules).unwrap()
}
