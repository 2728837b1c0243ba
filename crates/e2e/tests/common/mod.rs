//! Shared test doubles for the fixture bridge integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use fixture_bridge_common::{decode_transport, Error, Result};
use fixture_bridge_e2e::{CommandInvocation, ExecutionChannel, Page, RawResult, Subcommand};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

/// Records every invocation and replays queued responses
#[derive(Default)]
pub struct RecordingChannel {
    calls: Mutex<Vec<CommandInvocation>>,
    responses: Mutex<VecDeque<Result<RawResult>>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, stdout: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(RawResult::new(stdout)));
        self
    }

    pub fn fail(self, error: Error) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(CommandInvocation::command_line).collect()
    }
}

#[async_trait]
impl ExecutionChannel for RecordingChannel {
    async fn execute(&self, invocation: &CommandInvocation) -> Result<RawResult> {
        self.calls.lock().unwrap().push(invocation.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResult::default()))
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub nid: u32,
    pub node_type: String,
    pub title: String,
    pub moderation_state: String,
    pub alias: String,
}

#[derive(Default)]
struct BackendState {
    nodes: Vec<Node>,
    translations: BTreeMap<(String, u32, String), Value>,
    errors_logged: u64,
    next_nid: u32,
}

/// In-memory stand-in for the drush test-support commands.
///
/// Decodes transport arguments the way the real commands do: an argument
/// that base64-decodes to a JSON object is a structured spec, anything else
/// is a label.
pub struct FakeBackend {
    state: Mutex<BackendState>,
    received: Mutex<Vec<CommandInvocation>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                next_nid: 1,
                ..Default::default()
            }),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn with_node(self, node_type: &str, title: &str, alias: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let nid = state.next_nid;
            state.next_nid += 1;
            state.nodes.push(Node {
                nid,
                node_type: node_type.to_string(),
                title: title.to_string(),
                moderation_state: "published".to_string(),
                alias: alias.to_string(),
            });
        }
        self
    }

    pub fn log_errors(&self, count: u64) {
        self.state.lock().unwrap().errors_logged += count;
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.state.lock().unwrap().nodes.clone()
    }

    pub fn translations(&self) -> Vec<((String, u32, String), Value)> {
        self.state
            .lock()
            .unwrap()
            .translations
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn received(&self) -> Vec<CommandInvocation> {
        self.received.lock().unwrap().clone()
    }

    fn decode_spec(arg: &str) -> Option<Map<String, Value>> {
        let text = decode_transport(arg).ok()?;
        match serde_json::from_str::<Value>(&text).ok()? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    fn resolve(state: &BackendState, spec: &str) -> Result<Node> {
        let matches: Vec<&Node> = match Self::decode_spec(spec) {
            Some(fields) => state
                .nodes
                .iter()
                .filter(|n| {
                    fields.iter().all(|(key, value)| match key.as_str() {
                        "title" => value.as_str() == Some(n.title.as_str()),
                        "type" => value.as_str() == Some(n.node_type.as_str()),
                        "nid" => value.as_u64() == Some(u64::from(n.nid)),
                        _ => false,
                    })
                })
                .collect(),
            None => state.nodes.iter().filter(|n| n.title == spec).collect(),
        };
        match matches.as_slice() {
            [node] => Ok((*node).clone()),
            [] => Err(fault(&format!("No entity found for '{}'.", spec))),
            _ => Err(fault(&format!("Multiple entities found for '{}'.", spec))),
        }
    }

    fn handle(&self, invocation: &CommandInvocation) -> Result<String> {
        let args: Vec<&str> = invocation.args.iter().map(|a| a.as_str()).collect();
        let mut state = self.state.lock().unwrap();
        match (&invocation.subcommand, args.as_slice()) {
            (Subcommand::NodeGetId, [title]) => Ok(format!("{}\n", Self::resolve(&state, title)?.nid)),
            (Subcommand::EntityGetId, ["node", spec]) => Ok(format!("{}\n", Self::resolve(&state, spec)?.nid)),
            (Subcommand::NodeGetPath, [title]) => Ok(format!("/node/{}\n", Self::resolve(&state, title)?.nid)),
            (Subcommand::NodeGetPathAlias, [title, _langcode]) => Ok(format!("{}\n", Self::resolve(&state, title)?.alias)),
            (Subcommand::NodeClone, [node_type, title, new_title, moderation_state]) => {
                let source = Self::resolve(&state, title)?;
                if source.node_type != *node_type {
                    return Err(fault(&format!("'{}' is not a {}.", title, node_type)));
                }
                let nid = state.next_nid;
                state.next_nid += 1;
                state.nodes.push(Node {
                    nid,
                    node_type: source.node_type.clone(),
                    title: new_title.to_string(),
                    moderation_state: moderation_state.to_string(),
                    alias: format!("{}-{}", source.alias, nid),
                });
                Ok(format!("Cloned node {} to {}.\n", source.nid, nid))
            }
            (Subcommand::EntityAddTranslation, ["node", spec, langcode, translation]) => {
                let node = Self::resolve(&state, spec)?;
                let payload = decode_transport(translation)?;
                let payload: Value = serde_json::from_str(&payload)
                    .map_err(|e| fault(&format!("Translation is not JSON: {}", e)))?;
                let key = ("node".to_string(), node.nid, langcode.to_string());
                match state.translations.get(&key).cloned() {
                    Some(existing) if existing == payload => Ok("Translation already exists.\n".to_string()),
                    Some(_) => Ok("Translation already exists with different values.\n".to_string()),
                    None => {
                        state.translations.insert(key, payload);
                        Ok("Translation added.\n".to_string())
                    }
                }
            }
            (Subcommand::TestsCleanUp, [keyword]) => {
                state.nodes.retain(|n| !n.title.starts_with(keyword));
                Ok(String::new())
            }
            (Subcommand::TranslationCleanUp, [keyword, langcode]) => {
                let doomed: Vec<u32> = state
                    .nodes
                    .iter()
                    .filter(|n| n.title.starts_with(keyword))
                    .map(|n| n.nid)
                    .collect();
                state
                    .translations
                    .retain(|(_, nid, lang), _| !(lang == langcode && doomed.contains(nid)));
                Ok(String::new())
            }
            (Subcommand::CheckWatchdog, [_since, _fail_on_notice, verbose]) => {
                let mut report = json!({ "numberOfErrors": state.errors_logged });
                if *verbose == "true" {
                    report["errors"] = json!(["PHP Warning: something broke"]);
                }
                Ok(report.to_string())
            }
            _ => Err(fault(&format!("Command not understood: {}", invocation.command_line()))),
        }
    }
}

fn fault(message: &str) -> Error {
    Error::Execution {
        command: "drush".to_string(),
        status: "exit status: 1".to_string(),
        stdout: String::new(),
        stderr: format!("{}\n", message),
    }
}

#[async_trait]
impl ExecutionChannel for FakeBackend {
    async fn execute(&self, invocation: &CommandInvocation) -> Result<RawResult> {
        self.received.lock().unwrap().push(invocation.clone());
        self.handle(invocation).map(RawResult::new)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("navigation refused")]
pub struct NavigationRefused;

/// Page that records visited URLs
#[derive(Default)]
pub struct RecordingPage {
    pub visited: Mutex<Vec<String>>,
    pub refuse: bool,
}

impl RecordingPage {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Page for RecordingPage {
    type Response = u16;
    type Error = NavigationRefused;

    async fn goto(&self, url: &str) -> std::result::Result<u16, NavigationRefused> {
        if self.refuse {
            return Err(NavigationRefused);
        }
        self.visited.lock().unwrap().push(url.to_string());
        Ok(200)
    }
}
