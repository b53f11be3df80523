//! 対話式閲覧
//!
//! 一覧から登録を選び、境界の中心座標と写真（ライトボックス）を順に見る。

use crate::dashboard::Dashboard;
use crate::display;
use crate::error::{GeodaisError, Result};
use dialoguer::Input;
use geodais_common::{Lightbox, RecordSource, Registro};

/// 一覧プロンプトの操作
#[derive(Debug, PartialEq, Eq)]
pub enum ListAction {
    /// 番号で登録を選ぶ（0始まり）
    Select(usize),
    /// 一覧を再取得
    Reload,
    Quit,
    Invalid,
}

/// ライトボックスの操作
#[derive(Debug, PartialEq, Eq)]
pub enum PhotoAction {
    /// 番号で写真を開く（0始まり）
    Open(usize),
    Next,
    Previous,
    Close,
    Invalid,
}

pub fn parse_list_action(input: &str, count: usize) -> ListAction {
    match input.trim() {
        "q" | "Q" => ListAction::Quit,
        "r" | "R" => ListAction::Reload,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= count => ListAction::Select(n - 1),
            _ => ListAction::Invalid,
        },
    }
}

pub fn parse_photo_action(input: &str) -> PhotoAction {
    match input.trim() {
        "" | "n" | ">" => PhotoAction::Next,
        "p" | "<" => PhotoAction::Previous,
        "q" | "Q" | "x" => PhotoAction::Close,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => PhotoAction::Open(n - 1),
            _ => PhotoAction::Invalid,
        },
    }
}

/// ライトボックスに操作を適用する
pub fn apply_photo_action(lightbox: &mut Lightbox, action: &PhotoAction, photo_count: usize) {
    match action {
        PhotoAction::Open(i) => lightbox.open(*i),
        PhotoAction::Next => lightbox.next(photo_count),
        PhotoAction::Previous => lightbox.previous(photo_count),
        PhotoAction::Close => lightbox.close(),
        PhotoAction::Invalid => {}
    }
}

pub async fn run_browse<S: RecordSource>(dashboard: &Dashboard<S>) -> Result<()> {
    if !dashboard.environment().is_interactive() {
        return Err(GeodaisError::NotInteractive);
    }

    loop {
        let registros = dashboard.registros();
        if registros.is_empty() {
            println!("⚠ No hay registros");
        }

        println!();
        for (i, registro) in registros.iter().enumerate() {
            println!("  {:>3}) {}", i + 1, display::registro_line(registro));
        }
        println!();

        let input: String = Input::new()
            .with_prompt("Registro (número, r:recargar, q:salir)")
            .allow_empty(true)
            .interact_text()?;

        match parse_list_action(&input, registros.len()) {
            ListAction::Select(i) => {
                let registro = registros[i].clone();
                dashboard.select(registro.clone());
                println!("\n{}\n", display::registro_detail(&registro, dashboard.coordinates().as_deref()));
                if !registro.fotos.is_empty() {
                    browse_photos(&registro)?;
                }
            }
            ListAction::Reload => {
                if let Err(e) = dashboard.refresh().await {
                    println!("⚠ {}", e);
                }
            }
            ListAction::Quit => return Ok(()),
            ListAction::Invalid => println!("⚠ Opción no válida"),
        }
    }
}

fn browse_photos(registro: &Registro) -> Result<()> {
    let count = registro.fotos.len();
    let mut lightbox = Lightbox::default();

    loop {
        let prompt = if lightbox.is_open() {
            "Foto (Enter/n:siguiente p:anterior número:abrir q:cerrar)"
        } else {
            "Abrir foto (número, q:volver)"
        };
        let input: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        let action = parse_photo_action(&input);
        if action == PhotoAction::Close {
            return Ok(());
        }
        if !lightbox.is_open() && !matches!(action, PhotoAction::Open(_)) {
            continue;
        }
        apply_photo_action(&mut lightbox, &action, count);

        match display::lightbox_caption(&lightbox, registro) {
            Some(caption) => println!("  {}", caption),
            None => println!("  ⚠ Foto no disponible"),
        }
    }
}
