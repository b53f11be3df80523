//! 端末版ダッシュボード
//!
//! データストアと地図ビュー（HeadlessMap）を結び、選択のたびに境界を描き直す。

use crate::error::{GeodaisError, Result};
use geodais_common::{
    follow_selection, DataStore, Environment, HeadlessMap, MapConfig, MapView, RecordSource,
    Registro,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::io::IsTerminal;
use std::rc::Rc;
use std::time::Duration;

/// 端末が対話的に使えるか
pub fn detect_environment(batch: bool) -> Environment {
    let tty = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    Environment::from_interactive(tty && !batch)
}

pub struct Dashboard<S: RecordSource> {
    store: Rc<DataStore<S>>,
    map: Rc<RefCell<MapView<HeadlessMap>>>,
    env: Environment,
}

impl<S: RecordSource> Dashboard<S> {
    pub fn new(source: S, map_config: MapConfig, env: Environment) -> Result<Self> {
        let store = Rc::new(DataStore::new(source));
        let map = Rc::new(RefCell::new(MapView::new(HeadlessMap::default(), map_config)));
        map.borrow_mut().initialize(env)?;
        follow_selection(&store, Rc::clone(&map));
        Ok(Self { store, map, env })
    }

    /// 起動時の読込（非対話モードでは何もしない）
    pub async fn start(&self) -> bool {
        self.store.init(self.env).await
    }

    /// 明示的な再取得
    pub async fn refresh(&self) -> Result<usize> {
        Ok(self.store.load_registros().await?)
    }

    pub fn registros(&self) -> Vec<Registro> {
        self.store.registros().get()
    }

    pub fn select(&self, registro: Registro) {
        self.store.select(registro);
    }

    pub fn select_key(&self, key: &str) -> Result<Registro> {
        let registro = self
            .store
            .find(key)
            .ok_or_else(|| GeodaisError::RegistroNotFound(key.to_string()))?;
        self.store.select(registro.clone());
        Ok(registro)
    }

    pub fn selected(&self) -> Option<Registro> {
        self.store.selected().get()
    }

    pub fn coordinates(&self) -> Option<String> {
        self.map.borrow().current_coordinates()
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    pub fn store(&self) -> &DataStore<S> {
        &self.store
    }

    pub fn map(&self) -> std::cell::Ref<'_, MapView<HeadlessMap>> {
        self.map.borrow()
    }

    /// 読込中フラグに合わせてスピナーを表示する
    pub fn attach_spinner(&self) {
        let current: RefCell<Option<ProgressBar>> = RefCell::new(None);
        self.store.loading().subscribe(move |loading| {
            if *loading {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                    bar.set_style(style);
                }
                bar.set_message("Cargando registros...");
                bar.enable_steady_tick(Duration::from_millis(100));
                *current.borrow_mut() = Some(bar);
            } else if let Some(bar) = current.borrow_mut().take() {
                bar.finish_and_clear();
            }
        });
    }
}
