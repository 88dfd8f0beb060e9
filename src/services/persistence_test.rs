use super::*;
use crate::store::StoreError;
use canvas::doc::{self, Element, ElementBody, PhotoBody};
use canvas::engine::Action;
use canvas::geometry::Rect;
use canvas::pages::{AlbumRecord, PageRecord};
use std::sync::Mutex;

// =============================================================================
// MockStore
// =============================================================================

#[derive(Default)]
struct MockStore {
    saves: Mutex<Vec<(String, String)>>,
    fail: bool,
    delay_ms: u64,
}

#[async_trait::async_trait]
impl AlbumStore for MockStore {
    async fn get_album(&self, album_id: &str) -> Result<AlbumRecord, StoreError> {
        Err(StoreError::AlbumNotFound(album_id.to_owned()))
    }

    async fn save_page_content(&self, page_id: &str, content: &str) -> Result<SaveResult, StoreError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail {
            return Err(StoreError::PageNotFound(page_id.to_owned()));
        }
        self.saves.lock().unwrap().push((page_id.to_owned(), content.to_owned()));
        Ok(SaveResult { success: true })
    }

    async fn add_page(&self) -> Result<PageRecord, StoreError> {
        Ok(PageRecord::blank(1))
    }

    async fn remove_page(&self, page_id: &str) -> Result<PageRecord, StoreError> {
        Err(StoreError::PageNotFound(page_id.to_owned()))
    }
}

fn photo() -> Element {
    Element::new(ElementBody::Photo(PhotoBody { src: "a.jpg".into() }), Rect::new(0.0, 0.0, 10.0, 10.0), 1)
}

// =============================================================================
// dispatch
// =============================================================================

#[tokio::test]
async fn dispatch_reaches_store() {
    let store = Arc::new(MockStore::default());
    let dispatcher = SaveDispatcher::new(store.clone());
    dispatcher.dispatch("p1", "[]".to_owned()).await.unwrap();
    assert_eq!(*store.saves.lock().unwrap(), vec![("p1".to_owned(), "[]".to_owned())]);
}

#[tokio::test]
async fn dispatch_returns_before_save_completes() {
    let store = Arc::new(MockStore { delay_ms: 50, ..Default::default() });
    let dispatcher = SaveDispatcher::new(store.clone());
    let handle = dispatcher.dispatch("p1", "[]".to_owned());
    assert!(store.saves.lock().unwrap().is_empty());
    handle.await.unwrap();
    assert_eq!(store.saves.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_save_is_absorbed() {
    let store = Arc::new(MockStore { fail: true, ..Default::default() });
    let dispatcher = SaveDispatcher::new(store.clone());
    dispatcher.dispatch("p1", "[]".to_owned()).await.unwrap();
    assert!(store.saves.lock().unwrap().is_empty());
}

// =============================================================================
// Engine saves
// =============================================================================

fn dispatch_saves(dispatcher: &SaveDispatcher, page_id: &str, actions: &[Action]) -> Vec<JoinHandle<()>> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::Save(elements) => Some(dispatcher.dispatch(page_id, doc::serialize(elements).unwrap())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn saved_content_parses_back() {
    let store = Arc::new(MockStore::default());
    let dispatcher = SaveDispatcher::new(store.clone());
    let el = photo();
    let actions = vec![
        Action::RenderNeeded,
        Action::Save(vec![el.clone()]),
        Action::SelectionChanged(Some(el.id.clone())),
    ];
    let handles = dispatch_saves(&dispatcher, "p1", &actions);
    assert_eq!(handles.len(), 1);
    assert_eq!(drain(handles, Duration::from_secs(5)).await, 1);

    let saves = store.saves.lock().unwrap();
    let saved = doc::try_parse(&saves[0].1).unwrap();
    assert_eq!(saved, vec![el]);
}

#[tokio::test]
async fn engine_saves_flow_through() {
    use canvas::engine::{EngineCore, TextPreset};
    use canvas::geometry::{Format, Size};

    let store = Arc::new(MockStore::default());
    let dispatcher = SaveDispatcher::new(store.clone());
    let mut core = EngineCore::new(Format::new(20.0, 20.0), Size::new(800.0, 800.0));
    core.open_page("p1", "");

    let mut handles = dispatch_saves(&dispatcher, "p1", &core.insert_text(TextPreset::Headline));
    handles.extend(dispatch_saves(&dispatcher, "p1", &core.insert_text(TextPreset::Body)));
    assert_eq!(drain(handles, Duration::from_secs(5)).await, 2);

    let saves = store.saves.lock().unwrap();
    assert_eq!(saves.len(), 2);
    let lens: Vec<usize> = saves.iter().map(|(_, c)| doc::try_parse(c).unwrap().len()).collect();
    lens.iter().for_each(|n| assert!(*n == 1 || *n == 2));
    assert!(lens.contains(&2));
}

// =============================================================================
// drain
// =============================================================================

#[tokio::test]
async fn drain_times_out_on_slow_saves() {
    let store = Arc::new(MockStore { delay_ms: 10_000, ..Default::default() });
    let dispatcher = SaveDispatcher::new(store);
    let handles = vec![dispatcher.dispatch("p1", "[]".to_owned())];
    assert_eq!(drain(handles, Duration::from_millis(20)).await, 0);
}

#[tokio::test]
async fn drain_empty_is_zero() {
    assert_eq!(drain(Vec::new(), Duration::from_millis(1)).await, 0);
}
