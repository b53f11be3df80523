//! データストア
//!
//! レコード一覧・選択中レコード・読込中フラグの3つのリアクティブセルを持つ。
//! 取得処理は `RecordSource` に委譲する（ブラウザは fetch、CLIは reqwest）。

use crate::environment::Environment;
use crate::error::Result;
use crate::observable::Observable;
use crate::types::Registro;
use std::cell::Cell;

/// レコード取得元
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    async fn fetch_registros(&self) -> Result<Vec<Registro>>;
}

pub struct DataStore<S> {
    source: S,
    registros: Observable<Vec<Registro>>,
    selected: Observable<Option<Registro>>,
    loading: Observable<bool>,
    initialized: Cell<bool>,
}

impl<S: RecordSource> DataStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            registros: Observable::new(Vec::new()),
            selected: Observable::new(None),
            loading: Observable::new(false),
            initialized: Cell::new(false),
        }
    }

    /// 起動時の読込。対話的な環境で一度だけ実行する。
    ///
    /// 実際に読込を行った場合に `true` を返す。
    pub async fn init(&self, env: Environment) -> bool {
        if !env.is_interactive() {
            log::debug!("non-interactive environment, skipping initial fetch");
            return false;
        }
        if self.initialized.replace(true) {
            return false;
        }
        // 失敗はログ済み
        let _ = self.load_registros().await;
        true
    }

    /// 一覧を一回だけ取得する（リトライなし）
    ///
    /// 成功時は一覧を丸ごと置き換える。失敗時はログを出し一覧はそのまま。
    /// 読込中フラグは結果にかかわらず最後に `false` に戻す。
    pub async fn load_registros(&self) -> Result<usize> {
        self.loading.set(true);
        let result = self.source.fetch_registros().await;
        let outcome = match result {
            Ok(registros) => {
                let count = registros.len();
                log::debug!("loaded {} registros", count);
                self.registros.set(registros);
                Ok(count)
            }
            Err(e) => {
                log::error!("Error cargando registros: {}", e);
                Err(e)
            }
        };
        self.loading.set(false);
        outcome
    }

    /// 選択中レコードを設定する（一覧に含まれるかは検証しない）
    pub fn select(&self, registro: Registro) {
        self.selected.set(Some(registro));
    }

    pub fn find(&self, internal_key: &str) -> Option<Registro> {
        self.registros
            .with(|list| list.iter().find(|r| r.internal_key == internal_key).cloned())
    }

    pub fn registros(&self) -> &Observable<Vec<Registro>> {
        &self.registros
    }

    pub fn selected(&self) -> &Observable<Option<Registro>> {
        &self.selected
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.loading
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 呼び出し時点の loading を記録するモック
    struct MockSource {
        responses: RefCell<Vec<Result<Vec<Registro>>>>,
        loading_seen: Rc<RefCell<Vec<bool>>>,
        loading_probe: RefCell<Option<Rc<Observable<bool>>>>,
        calls: Cell<usize>,
    }

    impl MockSource {
        fn new(responses: Vec<Result<Vec<Registro>>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                loading_seen: Rc::new(RefCell::new(Vec::new())),
                loading_probe: RefCell::new(None),
                calls: Cell::new(0),
            }
        }
    }

    impl RecordSource for MockSource {
        async fn fetch_registros(&self) -> Result<Vec<Registro>> {
            self.calls.set(self.calls.get() + 1);
            if let Some(probe) = self.loading_probe.borrow().as_ref() {
                self.loading_seen.borrow_mut().push(probe.get());
            }
            self.responses.borrow_mut().remove(0)
        }
    }

    fn registro(key: &str) -> Registro {
        Registro {
            internal_key: key.to_string(),
            nombre_completo: format!("Productor {}", key),
            ..Default::default()
        }
    }

    fn record_loading(store: &DataStore<MockSource>) -> Rc<RefCell<Vec<bool>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.loading().subscribe(move |v| sink.borrow_mut().push(*v));
        seen
    }

    #[test]
    fn test_load_success_replaces_registros() {
        let store = DataStore::new(MockSource::new(vec![
            Ok(vec![registro("a"), registro("b")]),
            Ok(vec![registro("c")]),
        ]));
        let transitions = record_loading(&store);

        assert_eq!(block_on(store.load_registros()).unwrap(), 2);
        assert_eq!(store.registros().get().len(), 2);

        block_on(store.load_registros()).unwrap();
        let keys: Vec<String> = store.registros().get().into_iter().map(|r| r.internal_key).collect();
        assert_eq!(keys, vec!["c"]);
        assert_eq!(*transitions.borrow(), vec![true, false, true, false]);
        assert!(!store.loading().get());
    }

    #[test]
    fn test_load_failure_keeps_registros() {
        let store = DataStore::new(MockSource::new(vec![
            Ok(vec![registro("a")]),
            Err(Error::HttpStatus(500)),
        ]));
        block_on(store.load_registros()).unwrap();
        let transitions = record_loading(&store);

        let result = block_on(store.load_registros());
        assert!(matches!(result, Err(Error::HttpStatus(500))));
        assert_eq!(store.registros().get(), vec![registro("a")]);
        assert_eq!(*transitions.borrow(), vec![true, false]);
        assert!(!store.loading().get());
    }

    #[test]
    fn test_loading_is_true_while_fetching() {
        let store = Rc::new(DataStore::new(MockSource::new(vec![Ok(vec![])])));
        // セル本体は store 内にあるので、購読で値を中継する
        let probe = Rc::new(Observable::new(false));
        let relay = Rc::clone(&probe);
        store.loading().subscribe(move |v| relay.set(*v));
        *store.source().loading_probe.borrow_mut() = Some(probe);

        block_on(store.load_registros()).unwrap();
        assert_eq!(*store.source().loading_seen.borrow(), vec![true]);
        assert!(!store.loading().get());
    }

    #[test]
    fn test_init_runs_once_in_interactive_env() {
        let store = DataStore::new(MockSource::new(vec![Ok(vec![registro("a")])]));
        assert!(block_on(store.init(Environment::Interactive)));
        assert!(!block_on(store.init(Environment::Interactive)));
        assert_eq!(store.source().calls.get(), 1);
        assert_eq!(store.registros().get().len(), 1);
    }

    #[test]
    fn test_init_skipped_in_prerender() {
        let store = DataStore::new(MockSource::new(vec![]));
        assert!(!block_on(store.init(Environment::Prerender)));
        assert_eq!(store.source().calls.get(), 0);
        assert!(!store.loading().get());
    }

    #[test]
    fn test_select_and_find() {
        let store = DataStore::new(MockSource::new(vec![Ok(vec![registro("a"), registro("b")])]));
        block_on(store.load_registros()).unwrap();

        let b = store.find("b").expect("b should exist");
        store.select(b.clone());
        assert_eq!(store.selected().get(), Some(b));
        assert!(store.find("zzz").is_none());

        // 一覧外のレコードも選択できる
        store.select(registro("outside"));
        assert_eq!(store.selected().get().map(|r| r.internal_key), Some("outside".to_string()));
    }
}
