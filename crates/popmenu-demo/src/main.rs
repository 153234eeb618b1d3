#![forbid(unsafe_code)]

//! Headless demo: wires a context menu to a host region and drives it with
//! synthetic events, printing the popup surface after each step.
//!
//! This is the sample glue, not part of the widget library. Run with
//! `RUST_LOG=debug` to see the menu's lifecycle events.

use popmenu::{Menu, MenuItem, MenuOptions, Surface};
use popmenu_core::geometry::Rect;
use popmenu_core::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

const VIEWPORT: Rect = Rect::new(0, 0, 60, 16);

fn right_up(x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Right), x, y))
}

fn left_up(x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, y))
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

fn build_menu() -> Menu {
    let options = MenuOptions::new()
        .on_before_open(|menu| {
            tracing::info!("before open");
            if let Some(target) = menu.current_target()
                && let Some(status) = menu.item_mut("status")
            {
                status.set_content(format!("opened at {},{}", target.x, target.y));
            }
        })
        .item(MenuItem::button("こんにちは").with_id("hello").on_click(
            |_, item| {
                tracing::info!("{} clicked", item.id().unwrap_or("?"));
            },
        ))
        .item(
            MenuItem::button("せかい")
                .with_id("world")
                .on_click(|_, item| {
                    tracing::info!("{} clicked", item.id().unwrap_or("?"));
                }),
        )
        .item(
            MenuItem::button("アイテム１")
                .with_id("item1")
                .with_disabled(true)
                .on_click(|_, item| {
                    tracing::info!("{} clicked", item.id().unwrap_or("?"));
                }),
        )
        .item(
            MenuItem::button("")
                .with_id("1")
                .with_fit_content(true)
                .on_click(|_, item| {
                    tracing::info!("{} clicked", item.id().unwrap_or("?"));
                }),
        )
        .item(
            MenuItem::checkbox("check 1")
                .with_id("check 1")
                .on_click(|_, item| {
                    tracing::info!("{} clicked: {}", item.id().unwrap_or("?"), item.checked());
                }),
        )
        .item(MenuItem::rule())
        .item(MenuItem::label("").with_id("status"))
        .item(
            MenuItem::input("name")
                .with_id("name")
                .with_placeholder("type and press Enter")
                .on_submit(|_, item| {
                    tracing::info!("submitted: {:?}", item.value());
                }),
        );

    Menu::new(VIEWPORT, options).expect("demo item ids are unique")
}

fn show(menu: &Menu) {
    let mut surface = Surface::new(VIEWPORT.width, VIEWPORT.height);
    menu.render(&mut surface);
    for y in 0..surface.height() {
        println!("{}", surface.row_text(y));
    }
    println!();
}

/// First content cell of row `idx` in the open popup.
fn row_point(menu: &Menu, idx: usize) -> (u16, u16) {
    let area = menu.area().expect("menu is open");
    (area.x + 1, area.y + 1 + idx as u16)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut menu = build_menu();

    // Right-click near the bottom-right corner; the popup clamps into view.
    menu.handle_event(&right_up(55, 14), VIEWPORT);
    println!("opened (clamped) at {:?}:", menu.area());
    show(&menu);

    // Toggle the checkbox.
    let (x, y) = row_point(&menu, 4);
    menu.handle_event(&left_up(x, y), VIEWPORT);
    println!(
        "checkbox now: {}",
        menu.item("check 1").map(MenuItem::checked).unwrap_or(false)
    );

    // Reopen elsewhere, focus the input, type, submit.
    menu.handle_event(&right_up(5, 3), VIEWPORT);
    let (x, y) = row_point(&menu, 7);
    menu.handle_event(&left_up(x, y), VIEWPORT);
    for c in "Ada".chars() {
        menu.handle_event(&key(KeyCode::Char(c)), VIEWPORT);
    }
    show(&menu);
    menu.handle_event(&key(KeyCode::Enter), VIEWPORT);

    println!("final value: {:?}", menu.item("name").unwrap().value());
}
