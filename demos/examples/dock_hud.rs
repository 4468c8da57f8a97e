// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small HUD docked to the corners of the screen, shown at two resolutions.
//!
//! This example shows how to combine:
//! - `understory_scene` as the host scene graph,
//! - `understory_dock` for anchoring panels and rescaling them when the window changes size.
//!
//! Run:
//! - `cargo run -p understory_demos --example dock_hud`
//! - `RUST_LOG=understory_dock=trace cargo run -p understory_demos --example dock_hud`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_dock::adapters::scene::DockScene;
use understory_dock::{Constraint, Dock, DockError, PositionedNode, RootPane, ViewportSize};
use understory_scene::{LocalNode, NodeId, Scene};

fn print_layout(viewport: ViewportSize, host: &DockScene, nodes: &[(&str, NodeId)]) {
    let screen = Rect::from_origin_size(Point::ORIGIN, viewport.as_size());
    println!("== {viewport} ==");
    for (name, id) in nodes {
        let Some(bounds) = host.scene().world_bounds(*id) else {
            continue;
        };
        println!(
            "{name:>10}: x {:>7.2}..{:<7.2} y {:>7.2}..{:<7.2} size {:?} on screen={} visible={}",
            bounds.x0,
            bounds.x1,
            bounds.y0,
            bounds.y1,
            bounds.size(),
            screen.union(bounds) == screen,
            host.is_visible(*id),
        );
    }
}

fn main() -> Result<(), DockError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = DockScene::new(Scene::new());
    let root = host.insert(None, LocalNode::default());
    let hd = ViewportSize::from_pixels(1280, 720);
    let mut pane = RootPane::new(root, hd);

    // Health bar in the top-left corner, inset by a few design pixels.
    let health = host.insert(None, LocalNode::panel(220.0, 24.0));
    pane.add_child(&mut host, root, health, &[Constraint::Dock(Dock::TopLeft)])?;
    pane.set_position(&mut host, health, 12.0, 12.0)?;

    // Square minimap that must stay square on wide screens.
    let minimap = host.insert(None, LocalNode::panel(160.0, 160.0));
    pane.add_child(
        &mut host,
        root,
        minimap,
        &[Constraint::Dock(Dock::TopRight), Constraint::LockScaling(true)],
    )?;
    pane.set_position(&mut host, minimap, 12.0, 12.0)?;

    // Action bar along the bottom with two buttons docked inside it.
    let bar = host.insert(None, LocalNode::panel(480.0, 64.0));
    pane.add_child(&mut host, root, bar, &[Constraint::Dock(Dock::BottomCenter)])?;
    let attack = host.insert(None, LocalNode::panel(56.0, 56.0));
    pane.add_child(&mut host, bar, attack, &[Constraint::Dock(Dock::LeftCenter)])?;
    pane.set_position(&mut host, attack, 4.0, 0.0)?;
    let defend = host.insert(None, LocalNode::panel(56.0, 56.0));
    pane.add_child(&mut host, bar, defend, &[Constraint::Dock(Dock::RightCenter)])?;
    pane.set_position(&mut host, defend, 4.0, 0.0)?;

    // A 3D marker is not a GUI element and cannot be docked.
    let marker = host.insert(Some(root), LocalNode::spatial());
    if let Err(err) = pane.add_child(&mut host, root, marker, &[]) {
        println!("marker: {err}");
    }

    let nodes = [
        ("health", health),
        ("minimap", minimap),
        ("bar", bar),
        ("attack", attack),
        ("defend", defend),
    ];
    print_layout(hd, &host, &nodes);

    // The window goes ultra-wide; everything follows without restating coordinates.
    let ultra_wide = ViewportSize::from_pixels(2560, 1080);
    pane.set_viewport(&mut host, ultra_wide);
    pane.set_visible(&mut host, defend, false)?;
    print_layout(ultra_wide, &host, &nodes);

    println!(
        "body text: 14pt at design size is {:.1}pt now",
        pane.scaled_font_size(14.0)
    );
    Ok(())
}
