//! 端末表示用の整形

use geodais_common::{Lightbox, Registro};

/// 一覧の1行
pub fn registro_line(registro: &Registro) -> String {
    format!(
        "{:<12} {:<28} {:<14} {:>8.2} ha  {}",
        registro.internal_key,
        registro.nombre_completo,
        registro.tipo_cultivo,
        registro.area_ha,
        registro.fecha_display()
    )
}

/// 詳細表示（座標は地図ビューが計算したもの）
pub fn registro_detail(registro: &Registro, coordinates: Option<&str>) -> String {
    let mut lines = vec![
        format!("📍 {} ({})", registro.nombre_completo, registro.internal_key),
        format!("  DNI productor: {}", registro.dni_productor),
        format!("  Cultivo:       {}", registro.tipo_cultivo),
        format!("  Área:          {:.2} ha", registro.area_ha),
        format!("  Creado:        {}", registro.fecha_display()),
        format!("  Coordenadas:   {}", coordinates.unwrap_or("-")),
        format!("  Fotos:         {}", registro.fotos.len()),
    ];
    for (i, foto) in registro.fotos.iter().enumerate() {
        lines.push(format!(
            "    {}) [{}] {}",
            i + 1,
            foto.tipo_foto,
            foto.url().unwrap_or("(sin URL)")
        ));
    }
    lines.join("\n")
}

/// ライトボックスの見出し（例: "Foto 2/3 [parcela] https://..."）
pub fn lightbox_caption(lightbox: &Lightbox, registro: &Registro) -> Option<String> {
    let index = lightbox.index()?;
    let tipo = registro
        .fotos
        .get(index)
        .map(|f| f.tipo_foto.as_str())
        .unwrap_or("-");
    Some(format!(
        "Foto {}/{} [{}] {}",
        index + 1,
        registro.fotos.len(),
        tipo,
        lightbox.current_url(&registro.fotos).unwrap_or("(sin URL)")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodais_common::Foto;

    fn sample() -> Registro {
        Registro {
            internal_key: "REG-9".into(),
            dni_productor: "40000001".into(),
            nombre_completo: "Juan Mamani".into(),
            tipo_cultivo: "Café".into(),
            area_ha: 1.234,
            fotos: vec![
                Foto { id: 1, tipo_foto: "parcela".into(), url: "https://img/1.jpg".into() },
                Foto { id: 2, tipo_foto: "dni".into(), url: String::new() },
            ],
            fecha_creacion: "2025-01-02T00:00:00Z".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_registro_line() {
        let line = registro_line(&sample());
        assert!(line.starts_with("REG-9"));
        assert!(line.contains("1.23 ha"));
        assert!(line.contains("Jan 2, 2025"));
    }

    #[test]
    fn test_registro_detail() {
        let detail = registro_detail(&sample(), Some("-9.000123, -70.015234"));
        assert!(detail.contains("Coordenadas:   -9.000123, -70.015234"));
        assert!(detail.contains("1) [parcela] https://img/1.jpg"));
        assert!(detail.contains("2) [dni] (sin URL)"));

        let detail = registro_detail(&sample(), None);
        assert!(detail.contains("Coordenadas:   -"));
    }

    #[test]
    fn test_lightbox_caption() {
        let registro = sample();
        let mut lightbox = Lightbox::default();
        assert_eq!(lightbox_caption(&lightbox, &registro), None);

        lightbox.open(0);
        assert_eq!(
            lightbox_caption(&lightbox, &registro).as_deref(),
            Some("Foto 1/2 [parcela] https://img/1.jpg")
        );
        lightbox.next(registro.fotos.len());
        assert_eq!(
            lightbox_caption(&lightbox, &registro).as_deref(),
            Some("Foto 2/2 [dni] (sin URL)")
        );
    }
}
