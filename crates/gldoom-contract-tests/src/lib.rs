//! Black-box contracts for the video shim; everything goes through public APIs.

#[cfg(test)]
mod shader;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use gldoom_core::{
        resolve, DisplayBounds, PlacementDiagnostic, VideoConfig, WindowPlacementConfig,
        WindowPosition,
    };

    // ---- Golden fixtures (JSON contracts) ----
    const TWO_DISPLAYS_JSON: &str = include_str!("../fixtures/video_two_displays.json");
    const STALE_DISPLAY_JSON: &str = include_str!("../fixtures/video_stale_display.json");

    fn write_temp_fixture(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("gldoom_contract_tests_{name}_{ts}.json"));
        fs::write(&p, contents).expect("write fixture");
        p
    }

    fn desk() -> Vec<DisplayBounds> {
        vec![
            DisplayBounds::new(0, 0, 1920, 1080),
            DisplayBounds::new(1920, -120, 1280, 1024),
            DisplayBounds::new(-800, 0, 800, 600),
        ]
    }

    fn placement(fullscreen: bool, display: i32, position: &str) -> WindowPlacementConfig {
        WindowPlacementConfig {
            fullscreen,
            target_display: display,
            position: position.to_string(),
        }
    }

    #[test]
    fn centered_window_stays_inside_its_display() {
        let displays = desk();
        for (d, b) in displays.iter().enumerate() {
            for (w, h) in [(1, 1), (320, 200), (b.w - 1, b.h - 1), (b.w, b.h), (b.w / 3, b.h)] {
                let mut c = placement(false, d as i32, "center");
                let r = resolve(&mut c, &displays, w, h);
                let WindowPosition::At { x, y } = r.position else {
                    panic!("display {d}: expected a position, got {:?}", r.position);
                };
                assert!(x >= b.x && y >= b.y, "display {d} {w}x{h}: ({x},{y})");
                assert!(x + w <= b.x + b.w, "display {d} {w}x{h}: x={x}");
                assert!(y + h <= b.y + b.h, "display {d} {w}x{h}: y={y}");
            }
        }
    }

    #[test]
    fn windowed_center_matches_fullscreen() {
        let displays = desk();
        for d in 0..3 {
            let mut windowed = placement(false, d, "center");
            let mut full = placement(true, d, "10,20");
            assert_eq!(
                resolve(&mut windowed, &displays, 640, 480).position,
                resolve(&mut full, &displays, 640, 480).position,
                "display {d}"
            );
        }
    }

    #[test]
    fn stale_display_index_is_reset_once() {
        let displays = desk();
        let mut c = placement(false, 3, "center");
        let r = resolve(&mut c, &displays, 320, 200);
        assert_eq!(c.target_display, 0);
        assert!(r.diagnostics.contains(&PlacementDiagnostic::DisplayReset {
            configured: 3,
            max: 2
        }));
        assert_eq!(r.position, WindowPosition::At { x: 800, y: 440 });

        // Already corrected: a second resolve is silent.
        let again = resolve(&mut c, &displays, 320, 200);
        assert!(again.diagnostics.is_empty());
    }

    #[test]
    fn garbage_position_falls_back_to_default() {
        let displays = desk();
        let mut unset = placement(false, 0, "");
        let mut garbage = placement(false, 0, "garbage");
        let fallback = resolve(&mut garbage, &displays, 320, 200);
        assert_eq!(fallback.position, resolve(&mut unset, &displays, 320, 200).position);
        assert_eq!(fallback.position, WindowPosition::Default);
        assert_eq!(
            fallback.diagnostics,
            vec![PlacementDiagnostic::InvalidPosition {
                setting: "garbage".to_string()
            }]
        );
    }

    #[test]
    fn literal_position_ignores_display_bounds() {
        for displays in [desk(), vec![DisplayBounds::new(5000, 5000, 10, 10)]] {
            let mut c = placement(false, 0, "10,20");
            let r = resolve(&mut c, &displays, 4000, 4000);
            assert_eq!(r.position, WindowPosition::At { x: 10, y: 20 });
        }
    }

    #[test]
    fn golden_two_displays_config_centers_on_second() {
        let path = write_temp_fixture("two_displays", TWO_DISPLAYS_JSON);
        let cfg = VideoConfig::load(&path).expect("video_two_displays.json should parse");

        let mut p = cfg.placement();
        let r = resolve(&mut p, &desk(), cfg.width, cfg.height);
        assert_eq!(r.position, WindowPosition::At { x: 1920 + 320, y: -120 + 312 });

        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_stale_display_config_self_heals() {
        let path = write_temp_fixture("stale_display", STALE_DISPLAY_JSON);
        let mut cfg = VideoConfig::load(&path).expect("video_stale_display.json should parse");

        let mut p = cfg.placement();
        let r = resolve(&mut p, &desk(), cfg.width, cfg.height);
        assert_eq!(p.target_display, 0);
        assert_eq!(r.position, WindowPosition::At { x: 800, y: 440 });

        cfg.absorb_placement(&p);
        assert_eq!(cfg.video_display, 0);

        let _ = fs::remove_file(path);
    }
}
