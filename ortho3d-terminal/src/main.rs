//! ortho3d Terminal Demo - Rotating Solids
//!
//! Renders a cube and an icosahedron with parallel projection and
//! painter's-algorithm depth sorting.
//! Controls:
//!   - A/D / Left/Right: Azimuth
//!   - W/S / Up/Down: Altitude
//!   - E/R: Roll
//!   - Space: Toggle spinning
//!   - Tab: Next model
//!   - Q/ESC: Quit
//!
//! Usage: ortho3d-terminal [background-color]

use ortho3d_core::{solids, Color, Primitive, Triangle3};
use ortho3d_terminal::{AppConfig, Model, TerminalApp};
use std::env;
use std::io;

const PALETTE: &[Color] = &[
    Color::rgb(230, 57, 70),
    Color::rgb(241, 250, 238),
    Color::rgb(168, 218, 220),
    Color::rgb(69, 123, 157),
    Color::rgb(244, 162, 97),
    Color::rgb(42, 157, 143),
    Color::rgb(233, 196, 106),
    Color::rgb(131, 56, 236),
];

/// Give every run of `group` consecutive triangles the same palette color.
fn colorize(triangles: Vec<Triangle3>, group: usize) -> Vec<Primitive> {
    triangles
        .into_iter()
        .enumerate()
        .map(|(i, mut tri)| {
            let color = PALETTE[(i / group) % PALETTE.len()];
            tri.set_fill(color);
            tri.set_outline(color);
            Primitive::from(tri)
        })
        .collect()
}

fn main() -> io::Result<()> {
    println!("ortho3d Terminal Renderer - Loading...");

    let background = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<Color>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("Bad background: {}", e)))?,
        None => Color::BLACK,
    };

    let models = vec![
        Model {
            name: "cube".to_string(),
            // Four fan slices per face
            primitives: colorize(solids::cube(1.0), 4),
            extent: 3f64.sqrt(),
        },
        Model {
            name: "icosahedron".to_string(),
            primitives: colorize(solids::icosahedron(1.0), 1),
            extent: 0.5 * (10.0 + 2.0 * 5f64.sqrt()).sqrt(),
        },
    ];

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::new(models, AppConfig::default())?;
    app.set_background(background);
    app.run()?;

    println!("Thank you for using ortho3d!");
    Ok(())
}
