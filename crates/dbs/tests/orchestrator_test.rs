//! Tests for the orchestrator with substituted collaborators.

use async_trait::async_trait;
use dbs::{
    DbsErrorKind, DbsResult, GeminiError, GeminiErrorKind, ImageGenerator, InputSettings,
    ObsError, ObsErrorKind, Orchestrator, Passage, PromptGenerator, Reference, RunSettings,
    SceneConnector, SceneControl, SceneItem, ScenePrompt, ScriptureSource, Verse,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

type Log = Arc<Mutex<Vec<String>>>;

struct FixedScripture {
    title: &'static str,
}

#[async_trait]
impl ScriptureSource for FixedScripture {
    async fn fetch_passage(&self, reference: &Reference) -> DbsResult<Passage> {
        let mut passage = Passage::new();
        passage.set_title_once(self.title);
        for n in *reference.start_verse()..=*reference.end_verse() {
            passage.push(Verse {
                reference: reference.verse_label(n),
                text: format!("[{}] verse {}", n, n),
            });
        }
        Ok(passage)
    }
}

struct FixedPrompts {
    fail: bool,
    log: Log,
}

#[async_trait]
impl PromptGenerator for FixedPrompts {
    async fn generate_scene_prompts(&self, passage_text: &str) -> DbsResult<Vec<ScenePrompt>> {
        self.log
            .lock()
            .unwrap()
            .push(format!("Prompts:{}", passage_text));
        if self.fail {
            return Err(GeminiError::new(GeminiErrorKind::MalformedResponse("bad".to_string())).into());
        }
        Ok(vec![
            ScenePrompt {
                verse_range: "16".to_string(),
                description: "God's Love".to_string(),
                image_prompt: "light over the world".to_string(),
            },
            ScenePrompt {
                verse_range: "17".to_string(),
                description: "Blocked Scene".to_string(),
                image_prompt: "blocked".to_string(),
            },
            ScenePrompt {
                verse_range: "18".to_string(),
                description: "Belief".to_string(),
                image_prompt: "a believer".to_string(),
            },
        ])
    }
}

struct FakeImages;

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate_image(&self, prompt: &str) -> DbsResult<Vec<u8>> {
        if prompt == "blocked" {
            return Err(GeminiError::new(GeminiErrorKind::SafetyBlocked("SAFETY".to_string())).into());
        }
        Ok(format!("png:{}", prompt).into_bytes())
    }
}

struct LoggingControl {
    log: Log,
}

impl LoggingControl {
    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl SceneControl for LoggingControl {
    async fn create_scene(&mut self, scene_name: &str) -> Result<(), ObsError> {
        self.record(format!("CreateScene:{}", scene_name));
        Ok(())
    }

    async fn get_scene_item_list(&mut self, _scene_name: &str) -> Result<Vec<SceneItem>, ObsError> {
        Ok(Vec::new())
    }

    async fn get_input_settings(&mut self, _input_name: &str) -> Result<InputSettings, ObsError> {
        Ok(InputSettings {
            input_kind: "kind".to_string(),
            input_settings: json!({}),
        })
    }

    async fn set_input_settings(
        &mut self,
        input_name: &str,
        settings: Value,
        _overlay: bool,
    ) -> Result<(), ObsError> {
        self.record(format!("Set:{}={}", input_name, settings));
        Ok(())
    }

    async fn create_input(
        &mut self,
        _scene_name: &str,
        _input_name: &str,
        _input_kind: &str,
        _settings: Value,
        _enabled: bool,
    ) -> Result<i64, ObsError> {
        Ok(1)
    }

    async fn create_scene_item(
        &mut self,
        _scene_name: &str,
        _source_name: &str,
    ) -> Result<i64, ObsError> {
        Ok(2)
    }

    async fn set_current_program_scene(&mut self, scene_name: &str) -> Result<(), ObsError> {
        self.record(format!("Current:{}", scene_name));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ObsError> {
        self.record("Close".to_string());
        Ok(())
    }
}

struct FakeConnector {
    reachable: bool,
    log: Log,
}

#[async_trait]
impl SceneConnector for FakeConnector {
    type Control = LoggingControl;

    async fn connect(&self) -> Result<LoggingControl, ObsError> {
        self.log.lock().unwrap().push("Connect".to_string());
        if !self.reachable {
            return Err(ObsError::new(ObsErrorKind::Connection(
                "connection refused".to_string(),
            )));
        }
        Ok(LoggingControl {
            log: self.log.clone(),
        })
    }
}

fn orchestrator(
    output: &TempDir,
    title: &'static str,
    prompts_fail: bool,
    reachable: bool,
) -> (
    Orchestrator<FixedScripture, FixedPrompts, FakeImages, FakeConnector>,
    Log,
) {
    let log = Log::default();
    let orchestrator = Orchestrator::new(
        FixedScripture { title },
        FixedPrompts {
            fail: prompts_fail,
            log: log.clone(),
        },
        FakeImages,
        FakeConnector {
            reachable,
            log: log.clone(),
        },
        RunSettings::new(output.path().join("output")),
    );
    (orchestrator, log)
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[tokio::test]
async fn test_full_run() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let (orchestrator, log) = orchestrator(&temp_dir, "For God So Loved the World", false, true);

    let report = orchestrator.process("john 3:16-18").await?;
    let log = entries(&log);

    assert_eq!(report.reference().to_string(), "John 3:16-18");
    assert_eq!(report.title(), "For God So Loved the World");

    // Base layer first, then verse scenes newest-last-verse first, then activation.
    let scenes: Vec<_> = log.iter().filter(|e| e.starts_with("CreateScene:John")).collect();
    assert_eq!(
        scenes,
        vec![
            "CreateScene:John 3:18",
            "CreateScene:John 3:17",
            "CreateScene:John 3:16"
        ]
    );
    assert_eq!(log[1], r#"Set:Title={"text":"For God So Loved the World"}"#);
    assert_eq!(log[2], r#"Set:ScriptureReference={"text":"John 3:16-18"}"#);
    let current = log.iter().position(|e| e == "Current:John 3:16").unwrap();
    let prompts = log.iter().position(|e| e.starts_with("Prompts:")).unwrap();
    let last_verse_scene = log.iter().position(|e| e == "CreateScene:John 3:16").unwrap();
    assert!(last_verse_scene < current && current < prompts);
    assert_eq!(log[prompts], "Prompts:[16] verse 16 [17] verse 17 [18] verse 18");

    // The blocked prompt is skipped; the others keep their prompt index.
    assert_eq!(report.images().len(), 2);
    let dir = temp_dir.path().join("output").join("John_3_16-18");
    assert!(report.images()[0].filename.ends_with("img_0.png"));
    assert!(report.images()[1].filename.ends_with("img_2.png"));
    assert_eq!(report.images()[1].description, "Belief");
    assert_eq!(std::fs::read(dir.join("img_0.png"))?, b"png:light over the world");
    assert!(!dir.join("img_1.png").exists());
    assert!(log.contains(&"CreateScene:God's Love".to_string()));
    assert!(!log.contains(&"CreateScene:Blocked Scene".to_string()));

    assert_eq!(log.last().map(String::as_str), Some("Close"));
    Ok(())
}

#[tokio::test]
async fn test_verse_text_is_wrapped_for_display() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let log = Log::default();
    let orchestrator = Orchestrator::new(
        FixedScripture { title: "" },
        FixedPrompts {
            fail: false,
            log: log.clone(),
        },
        FakeImages,
        FakeConnector {
            reachable: true,
            log: log.clone(),
        },
        RunSettings::new(temp_dir.path().join("output")).with_max_chars_per_line(10),
    );

    orchestrator.process("John 3:16").await?;

    let log = entries(&log);
    assert!(log.contains(&r#"Set:text-John 3:16={"text":"[16] verse\n16"}"#.to_string()));
    // The prompt text stays on one line.
    assert!(log.contains(&"Prompts:[16] verse 16".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_empty_title_skips_title_source() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let (orchestrator, log) = orchestrator(&temp_dir, "", false, true);

    orchestrator.process("Psalms 23:1").await?;

    let log = entries(&log);
    assert!(!log.iter().any(|e| e.starts_with("Set:Title=")));
    assert!(log.contains(&r#"Set:ScriptureReference={"text":"Psalms 23:1"}"#.to_string()));
    Ok(())
}

#[tokio::test]
async fn test_prompt_failure_still_closes_session() {
    let temp_dir = TempDir::new().unwrap();
    let (orchestrator, log) = orchestrator(&temp_dir, "Heading", true, true);

    let err = orchestrator.process("John 3:16").await.unwrap_err();

    assert!(matches!(err.kind(), DbsErrorKind::Gemini(_)));
    let log = entries(&log);
    assert_eq!(log.last().map(String::as_str), Some("Close"));
    assert!(!temp_dir.path().join("output").exists());
}

#[tokio::test]
async fn test_connect_failure_aborts_before_prompts() {
    let temp_dir = TempDir::new().unwrap();
    let (orchestrator, log) = orchestrator(&temp_dir, "Heading", false, false);

    let err = orchestrator.process("John 3:16").await.unwrap_err();

    assert!(matches!(err.kind(), DbsErrorKind::Obs(_)));
    assert_eq!(entries(&log), vec!["Connect".to_string()]);
}

#[tokio::test]
async fn test_invalid_reference_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let (orchestrator, log) = orchestrator(&temp_dir, "Heading", false, true);

    let err = orchestrator.process("Judea 1:1").await.unwrap_err();

    assert!(matches!(err.kind(), DbsErrorKind::Parse(_)));
    assert!(entries(&log).is_empty());
}
