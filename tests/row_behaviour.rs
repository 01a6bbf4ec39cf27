//! End-to-end behaviour of a single action row driven the way a host list drives it

use actiontui::core::{
    ActionPayload, ActionRowError, ActionType, Axis, Feature, FeatureIdMapping, FeatureSet,
    OptionValue, PayloadPatch, RowMode, TransformerAction,
};
use actiontui::tui::components::{
    CodeView, CodeViewFuture, CodeViewerProvider, EditorEvent, JsonPayloadEditor,
    NumberedCodeView, PayloadEditor, ViewerLoadState,
};
use actiontui::tui::{Action, ActionRow, Component, RowCapabilities, RowEvent, RowProps, RowStyle};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::FutureExt;
use ratatui::{backend::TestBackend, layout::Rect, Frame, Terminal};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

type ViewResult = Result<Box<dyn CodeView>, ActionRowError>;

/// Resolves once the test sends a viewer through the channel
struct DelayedProvider {
    rx: Mutex<Option<oneshot::Receiver<ViewResult>>>,
}

impl CodeViewerProvider for DelayedProvider {
    fn load(&self) -> CodeViewFuture {
        let rx = self.rx.lock().unwrap().take();
        async move {
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ActionRowError::CodeViewerLoad("dropped".into()))),
                None => Err(ActionRowError::CodeViewerLoad("loaded twice".into())),
            }
        }
        .boxed()
    }
}

struct BrokenProvider;

impl CodeViewerProvider for BrokenProvider {
    fn load(&self) -> CodeViewFuture {
        futures::future::ready(Err(ActionRowError::CodeViewerLoad(
            "highlighter missing".into(),
        )))
        .boxed()
    }
}

/// Editor that saves a fixed override, standing in for a form-based editor
struct OverrideEditor {
    seeded: Arc<Mutex<Option<ActionPayload>>>,
    patch: PayloadPatch,
}

impl PayloadEditor for OverrideEditor {
    fn seed(&mut self, payload: &ActionPayload) {
        *self.seeded.lock().unwrap() = Some(payload.clone());
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<EditorEvent> {
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(EditorEvent::Save(self.patch.clone()))
            }
            KeyCode::Char('u') => {
                let mut draft = self.seeded.lock().unwrap().clone()?;
                draft.arguments.push("city".into());
                Some(EditorEvent::DraftChanged(draft))
            }
            _ => None,
        }
    }

    fn render(&mut self, _frame: &mut Frame, _area: Rect, _style: &RowStyle) {}

    fn height(&self) -> u16 {
        1
    }
}

fn features() -> (Arc<FeatureSet>, Arc<FeatureIdMapping>) {
    let set: FeatureSet = ["age", "income", "city"].into_iter().map(Feature::new).collect();
    let mapping = FeatureIdMapping::from_features(&set);
    (Arc::new(set), Arc::new(mapping))
}

fn props(action: TransformerAction) -> RowProps {
    let (set, mapping) = features();
    let mut props = RowProps::new(action, set, mapping, 0);
    props.capabilities = RowCapabilities::all();
    props
}

fn code_action() -> TransformerAction {
    TransformerAction::new(
        "Remove outliers",
        ActionPayload::new(ActionType::Filter, Axis::Row)
            .with_arguments(["income"])
            .with_code("income <= 310.5"),
    )
}

fn impute_action() -> TransformerAction {
    let options = [("a", 1i64), ("b", 2i64)].into_iter().collect();
    TransformerAction::new(
        "Fill in missing values",
        ActionPayload::new(ActionType::Impute, Axis::Column)
            .with_arguments(["age"])
            .with_options(options),
    )
}

fn draw(row: &mut ActionRow) -> String {
    let width = 60;
    let height = row.height(width);
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| row.render(f, f.area())).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

#[tokio::test]
async fn slow_code_viewer_only_delays_its_own_row() {
    let (tx, rx) = oneshot::channel();
    let provider = DelayedProvider {
        rx: Mutex::new(Some(rx)),
    };
    let mut slow = ActionRow::with_parts(
        props(code_action()),
        RowStyle::default(),
        Box::new(JsonPayloadEditor::new()),
        Arc::new(provider),
    );
    let mut fast = ActionRow::new(props(code_action()), RowStyle::default());

    assert!(draw(&mut slow).contains("Loading code viewer..."));
    assert_eq!(slow.code_viewer_state(), ViewerLoadState::Loading);

    // the other row renders and reacts while the first is still loading
    assert!(draw(&mut fast).contains("1 income <= 310.5"));
    assert_eq!(fast.handle_action(Action::Apply).unwrap(), Some(RowEvent::Apply));

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let _ = tx.send(Ok(Box::new(NumberedCodeView::default()) as Box<dyn CodeView>));
    });

    for _ in 0..200 {
        slow.update().unwrap();
        if slow.code_viewer_state() == ViewerLoadState::Ready {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(slow.code_viewer_state(), ViewerLoadState::Ready);
    assert!(draw(&mut slow).contains("1 income <= 310.5"));
}

#[test]
fn failed_code_viewer_falls_back_to_raw_code() {
    let mut row = ActionRow::with_parts(
        props(code_action()),
        RowStyle::default(),
        Box::new(JsonPayloadEditor::new()),
        Arc::new(BrokenProvider),
    );
    draw(&mut row);
    assert!(matches!(row.code_viewer_state(), ViewerLoadState::Failed(_)));

    let screen = draw(&mut row);
    assert!(screen.contains("viewer unavailable"));
    assert!(screen.contains("income <= 310.5"));
}

#[test]
fn save_merges_override_into_draft() {
    let seeded = Arc::new(Mutex::new(None));
    let mut options = actiontui::core::PayloadOptions::new();
    options.insert("b", 3i64);
    let editor = OverrideEditor {
        seeded: seeded.clone(),
        patch: PayloadPatch {
            options: Some(Some(options)),
            ..PayloadPatch::default()
        },
    };
    let mut row = ActionRow::with_parts(
        props(impute_action()),
        RowStyle::default(),
        Box::new(editor),
        Arc::new(actiontui::tui::components::BuiltinCodeViewerProvider::default()),
    );

    row.handle_action(Action::ToggleEdit).unwrap();
    assert_eq!(seeded.lock().unwrap().as_ref(), Some(&*impute_action().payload));

    // editor replaces the draft wholesale
    assert_eq!(
        row.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE))
            .unwrap(),
        None
    );
    assert_eq!(row.state().draft_payload().arguments, vec!["age", "city"]);

    let Some(RowEvent::SaveAction(request)) = row.handle_key_event(ctrl('s')).unwrap() else {
        panic!("expected a save request");
    };
    let saved = request.action_payload;
    // fields missing from the override keep the draft's values
    assert_eq!(saved.arguments, vec!["age", "city"]);
    let saved_options = saved.options.unwrap();
    assert_eq!(saved_options.get("b"), Some(&OptionValue::Int(3)));
    assert_eq!(saved_options.get("a"), None);
    assert_eq!(row.mode(), RowMode::Editing);
}

#[test]
fn toggling_twice_without_saving_leaves_payload_untouched() {
    let mut row = ActionRow::new(props(impute_action()), RowStyle::default());
    let committed = row.action().payload.clone();

    assert_eq!(row.handle_action(Action::ToggleEdit).unwrap(), None);
    assert_eq!(row.mode(), RowMode::Editing);
    assert_eq!(row.handle_key_event(ctrl('e')).unwrap(), None);
    assert_eq!(row.mode(), RowMode::View);

    assert!(Arc::ptr_eq(&committed, &row.action().payload));
    assert_eq!(row.state().draft_payload(), &*committed);
}

#[test]
fn parent_payload_wins_over_unsaved_edits() {
    let seeded = Arc::new(Mutex::new(None));
    let editor = OverrideEditor {
        seeded: seeded.clone(),
        patch: PayloadPatch::default(),
    };
    let mut row = ActionRow::with_parts(
        props(impute_action()),
        RowStyle::default(),
        Box::new(editor),
        Arc::new(actiontui::tui::components::BuiltinCodeViewerProvider::default()),
    );
    row.handle_action(Action::ToggleEdit).unwrap();
    row.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE))
        .unwrap();
    assert_eq!(row.state().draft_payload().arguments.len(), 2);

    // same identity: nothing happens
    row.set_action(row.action().clone());
    assert_eq!(row.state().draft_payload().arguments.len(), 2);

    // new identity: the draft and the editor are reset
    let mut fresh = row.action().clone();
    fresh.payload = Arc::new((*fresh.payload).clone());
    row.set_action(fresh);
    assert_eq!(row.state().draft_payload().arguments, vec!["age"]);
    assert_eq!(
        seeded.lock().unwrap().as_ref().map(|p| p.arguments.clone()),
        Some(vec!["age".to_string()])
    );
    assert_eq!(row.mode(), RowMode::Editing);
}

#[test]
fn rows_without_capabilities_show_no_controls() {
    let (set, mapping) = features();
    let mut row = ActionRow::new(
        RowProps::new(impute_action(), set, mapping, 0),
        RowStyle::default(),
    );
    let screen = draw(&mut row);
    assert!(!screen.contains("[Apply]"));
    assert!(!screen.contains("edit"));
    assert!(!screen.contains("dismiss"));
    assert!(screen.contains("a: 1, b: 2"));
    assert!(!row.supported_actions().contains(&Action::Apply));
    assert!(!row.supported_actions().contains(&Action::ToggleEdit));
}
