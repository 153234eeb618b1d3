#![forbid(unsafe_code)]

//! The menu container and its lifecycle.
//!
//! A [`Menu`] watches a host region for the secondary-button release
//! gesture. On open it records the pointer cell as the current target, runs
//! the optional pre-open hook (so callers can retune item content and
//! disabled state per invocation), measures the popup, and clamps it into
//! the viewport. A release on a row runs the close-then-callback activation
//! path; a press anywhere outside the popup light-dismisses it.
//!
//! Event handling follows the consumed-`bool` convention: `handle_event`
//! returns `true` when the menu acted on the event and the host application
//! should not.

use std::fmt;
use std::mem;

use ahash::AHashMap;
use popmenu_core::event::{
    Event, ImeEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use popmenu_core::geometry::{Point, Rect};

use crate::error::MenuError;
use crate::item::{ItemVariant, MenuItem};
use crate::placement;
use crate::surface::{Cell, CellAttrs, Surface};

/// Hook invoked after the pointer target is recorded but before the popup
/// is measured and shown.
pub type OpenHandler = Box<dyn FnMut(&mut Menu)>;

/// Configuration for a menu: an ordered item list and an optional pre-open
/// hook.
#[derive(Default)]
pub struct MenuOptions {
    items: Vec<MenuItem>,
    on_before_open: Option<OpenHandler>,
}

impl MenuOptions {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item (builder).
    #[must_use]
    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append several items (builder).
    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the pre-open hook (builder).
    #[must_use]
    pub fn on_before_open(mut self, hook: impl FnMut(&mut Menu) + 'static) -> Self {
        self.on_before_open = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for MenuOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("items", &self.items)
            .field("on_before_open", &self.on_before_open.is_some())
            .finish()
    }
}

/// A context menu attached to a host region.
pub struct Menu {
    host: Rect,
    entries: Vec<MenuItem>,
    index: AHashMap<String, usize>,
    on_before_open: Option<OpenHandler>,
    /// Popup rectangle while open.
    area: Option<Rect>,
    /// Pointer cell recorded at the last open; survives `close`.
    current_target: Option<Point>,
    /// Index of the focused input item, if any.
    focus: Option<usize>,
}

impl Menu {
    /// Create a menu over `host` from the given configuration.
    ///
    /// Items are registered in declaration order. A duplicate identifier is
    /// a configuration error and fails fast.
    pub fn new(host: Rect, options: MenuOptions) -> Result<Self, MenuError> {
        let mut index = AHashMap::with_capacity(options.items.len());
        for (i, item) in options.items.iter().enumerate() {
            if let Some(id) = item.id()
                && index.insert(id.to_string(), i).is_some()
            {
                return Err(MenuError::DuplicateId { id: id.to_string() });
            }
        }
        Ok(Self {
            host,
            entries: options.items,
            index,
            on_before_open: options.on_before_open,
            area: None,
            current_target: None,
            focus: None,
        })
    }

    /// The host region whose right-clicks this menu owns.
    #[must_use]
    pub fn host(&self) -> Rect {
        self.host
    }

    /// Whether the popup is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.area.is_some()
    }

    /// The popup rectangle while open.
    #[must_use]
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// The pointer cell recorded at the last open.
    #[must_use]
    pub fn current_target(&self) -> Option<Point> {
        self.current_target
    }

    /// Look up an item by identifier.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Look up an item by identifier, mutably.
    pub fn item_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        let i = *self.index.get(id)?;
        Some(&mut self.entries[i])
    }

    /// All items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.entries
    }

    /// All items in declaration order, mutably.
    pub fn items_mut(&mut self) -> &mut [MenuItem] {
        &mut self.entries
    }

    /// Hide the popup. Idempotent; the current target is retained.
    pub fn close(&mut self) {
        if self.area.take().is_some() {
            self.focus = None;
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "menu.close");
        }
    }

    /// Feed one input event. Returns `true` if the menu consumed it.
    pub fn handle_event(&mut self, event: &Event, viewport: Rect) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, viewport),
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                self.handle_key(key)
            }
            Event::Ime(ime) => self.handle_ime(ime),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, viewport: Rect) -> bool {
        match mouse.kind {
            MouseEventKind::Down(button) => {
                if let Some(area) = self.area {
                    if area.contains(mouse.x, mouse.y) {
                        // Activation happens on release.
                        true
                    } else {
                        // Light dismiss eats the press.
                        self.close();
                        true
                    }
                } else {
                    // Suppress the native context menu over the host.
                    button == MouseButton::Right && self.host.contains(mouse.x, mouse.y)
                }
            }
            MouseEventKind::Up(button) => {
                if let Some(area) = self.area {
                    if area.contains(mouse.x, mouse.y) {
                        self.activate_at(mouse.x, mouse.y)
                    } else if button == MouseButton::Right
                        && self.host.contains(mouse.x, mouse.y)
                    {
                        self.open_at(Point::new(mouse.x, mouse.y), viewport);
                        true
                    } else {
                        false
                    }
                } else if button == MouseButton::Right && self.host.contains(mouse.x, mouse.y) {
                    self.open_at(Point::new(mouse.x, mouse.y), viewport);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.area.is_none() {
            return false;
        }
        if key.code == KeyCode::Escape {
            self.close();
            return true;
        }
        let Some(idx) = self.focus else {
            return false;
        };
        if self.entries[idx].disabled() {
            return false;
        }
        if key.code == KeyCode::Enter {
            if self.entries[idx].composing() {
                // Enter confirms the IME preedit, not the field.
                return true;
            }
            self.dispatch_submit(idx);
            return true;
        }
        self.entries[idx].input_edit(key)
    }

    fn handle_ime(&mut self, ime: &ImeEvent) -> bool {
        if self.area.is_none() {
            return false;
        }
        let Some(idx) = self.focus else {
            return false;
        };
        if self.entries[idx].disabled() {
            return false;
        }
        self.entries[idx].input_ime(ime)
    }

    /// Open the popup with its top-left corner at `target`.
    fn open_at(&mut self, target: Point, viewport: Rect) {
        self.current_target = Some(target);

        if let Some(mut hook) = self.on_before_open.take() {
            hook(self);
            if self.on_before_open.is_none() {
                self.on_before_open = Some(hook);
            }
        }

        // Measured after the hook so per-open mutations affect layout.
        let size = placement::menu_size(&self.entries);
        let origin = placement::clamp_origin(target, size, viewport);
        self.area = Some(Rect::from_origin(origin, size));
        self.focus = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "menu.open",
            x = origin.x as usize,
            y = origin.y as usize,
            rows = self.entries.len()
        );
    }

    /// Handle a pointer release inside the popup.
    fn activate_at(&mut self, x: u16, y: u16) -> bool {
        let Some(area) = self.area else {
            return false;
        };
        let inner_x = area.x.saturating_add(1);
        let inner_y = area.y.saturating_add(1);
        if x < inner_x
            || x >= area.right().saturating_sub(1)
            || y < inner_y
            || y >= area.bottom().saturating_sub(1)
        {
            // Border or frame padding.
            return true;
        }

        let idx = (y - inner_y) as usize;
        let Some(entry) = self.entries.get(idx) else {
            return true;
        };
        // Fit-content rows only respond over their content.
        if entry.fit_content() && x >= inner_x.saturating_add(entry.row_width()) {
            return true;
        }

        match entry.variant() {
            ItemVariant::Button | ItemVariant::CheckBox => {
                if entry.disabled() {
                    // Short-circuit before the close-then-callback path.
                    return true;
                }
                self.dispatch_click(idx);
                true
            }
            ItemVariant::Input => {
                if !entry.disabled() {
                    self.focus = Some(idx);
                }
                true
            }
            ItemVariant::Label | ItemVariant::Rule => true,
        }
    }

    /// Close, then fire the click handler with the activated item detached.
    fn dispatch_click(&mut self, idx: usize) {
        let mut item = mem::replace(&mut self.entries[idx], MenuItem::detached());
        // Checkboxes flip before the shared path so the handler sees the
        // new state.
        item.toggle();
        self.close();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "menu.item_click",
            id = item.id().unwrap_or(""),
            checked = item.checked()
        );

        if let Some(mut handler) = item.take_click() {
            handler(self, &mut item);
            item.restore_click(handler);
        }
        self.entries[idx] = item;
    }

    /// Close, then fire the submit handler with the input item detached.
    fn dispatch_submit(&mut self, idx: usize) {
        let mut item = mem::replace(&mut self.entries[idx], MenuItem::detached());
        self.close();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "menu.input_submit",
            id = item.id().unwrap_or(""),
            value = item.value()
        );

        if let Some(mut handler) = item.take_submit() {
            handler(self, &mut item);
            item.restore_submit(handler);
        }
        self.entries[idx] = item;
    }

    /// Draw the popup into the surface. A no-op while closed.
    pub fn render(&self, surface: &mut Surface) {
        let Some(area) = self.area else {
            return;
        };
        surface.fill(area, Cell::default());
        draw_frame(surface, area);

        let inner_x = area.x.saturating_add(1);
        let limit = area.right().saturating_sub(1);
        for (i, entry) in self.entries.iter().enumerate() {
            let y = area.y.saturating_add(1).saturating_add(i as u16);
            if y >= area.bottom().saturating_sub(1) {
                break;
            }
            self.render_row(surface, entry, inner_x, y, limit, area, self.focus == Some(i));
        }
    }

    fn render_row(
        &self,
        surface: &mut Surface,
        entry: &MenuItem,
        x0: u16,
        y: u16,
        limit: u16,
        area: Rect,
        focused: bool,
    ) {
        let row_attrs = if entry.disabled() {
            CellAttrs::DIM
        } else {
            CellAttrs::empty()
        };

        match entry.variant() {
            ItemVariant::Button | ItemVariant::Label => {
                surface.put_str(x0, y, entry.content(), row_attrs, limit);
            }
            ItemVariant::CheckBox => {
                let mark = if entry.checked() { '✔' } else { ' ' };
                surface.set(x0, y, Cell::from_char(mark).with_attrs(row_attrs));
                surface.put_str(x0.saturating_add(2), y, entry.content(), row_attrs, limit);
            }
            ItemVariant::Rule => {
                for x in x0..limit {
                    surface.set(x, y, Cell::from_char('─'));
                }
                surface.set(area.x, y, Cell::from_char('├'));
                surface.set(limit, y, Cell::from_char('┤'));
            }
            ItemVariant::Input => {
                let mut x = surface.put_str(x0, y, entry.content(), row_attrs, limit);
                x = surface.put_str(x, y, ": ", row_attrs, limit);
                let field_x = x;

                if let Some(preedit) = entry.composition() {
                    let (before, after) = entry.value_split_at_cursor();
                    x = surface.put_str(x, y, before, row_attrs, limit);
                    x = surface.put_str(x, y, preedit, row_attrs | CellAttrs::UNDERLINE, limit);
                    surface.put_str(x, y, after, row_attrs, limit);
                } else if entry.value().is_empty() {
                    surface.put_str(
                        field_x,
                        y,
                        entry.placeholder(),
                        row_attrs | CellAttrs::DIM,
                        limit,
                    );
                    if focused {
                        reverse_cell(surface, field_x, y, limit);
                    }
                } else {
                    let (before, after) = entry.value_split_at_cursor();
                    x = surface.put_str(field_x, y, before, row_attrs, limit);
                    let cursor_x = x;
                    surface.put_str(x, y, after, row_attrs, limit);
                    if focused {
                        reverse_cell(surface, cursor_x, y, limit);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("host", &self.host)
            .field("area", &self.area)
            .field("current_target", &self.current_target)
            .field("items", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Mark the cell at `(x, y)` as the cursor by inverting it.
fn reverse_cell(surface: &mut Surface, x: u16, y: u16, limit: u16) {
    if x >= limit {
        return;
    }
    let cell = surface.get(x, y).copied().unwrap_or_default();
    let attrs = cell.attrs | CellAttrs::REVERSE;
    surface.set(x, y, cell.with_attrs(attrs));
}

/// Draw a single-line box border around the popup.
fn draw_frame(surface: &mut Surface, area: Rect) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let x = area.x;
    let y = area.y;
    let right = area.right() - 1;
    let bottom = area.bottom() - 1;

    surface.set(x, y, Cell::from_char('┌'));
    surface.set(right, y, Cell::from_char('┐'));
    surface.set(x, bottom, Cell::from_char('└'));
    surface.set(right, bottom, Cell::from_char('┘'));

    for col in (x + 1)..right {
        surface.set(col, y, Cell::from_char('─'));
        surface.set(col, bottom, Cell::from_char('─'));
    }
    for row in (y + 1)..bottom {
        surface.set(x, row, Cell::from_char('│'));
        surface.set(right, row, Cell::from_char('│'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn host() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn down(button: MouseButton, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(MouseEventKind::Down(button), x, y))
    }

    fn up(button: MouseButton, x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent::new(MouseEventKind::Up(button), x, y))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    /// Open the menu with a right-button release at `(x, y)`.
    fn open(menu: &mut Menu, x: u16, y: u16) {
        assert!(menu.handle_event(&up(MouseButton::Right, x, y), host()));
        assert!(menu.is_open());
    }

    /// Cell position of row `idx`'s first content column.
    fn row_point(menu: &Menu, idx: usize) -> (u16, u16) {
        let area = menu.area().unwrap();
        (area.x + 1, area.y + 1 + idx as u16)
    }

    #[test]
    fn duplicate_ids_fail_fast() {
        let options = MenuOptions::new()
            .item(MenuItem::button("a").with_id("x"))
            .item(MenuItem::button("b").with_id("x"));
        let err = Menu::new(host(), options).unwrap_err();
        assert_eq!(
            err,
            MenuError::DuplicateId {
                id: "x".to_string()
            }
        );
    }

    #[test]
    fn items_without_ids_never_collide() {
        let options = MenuOptions::new()
            .item(MenuItem::button("a"))
            .item(MenuItem::button("b"))
            .item(MenuItem::rule());
        let menu = Menu::new(host(), options).unwrap();
        assert_eq!(menu.items().len(), 3);
    }

    #[test]
    fn right_press_in_host_is_consumed_while_closed() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        assert!(menu.handle_event(&down(MouseButton::Right, 5, 5), host()));
        assert!(!menu.is_open());
        // Left press is the application's business.
        assert!(!menu.handle_event(&down(MouseButton::Left, 5, 5), host()));
    }

    #[test]
    fn right_release_opens_and_records_target() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        assert_eq!(menu.current_target(), Some(Point::new(10, 5)));
        assert_eq!(menu.area().unwrap().origin(), Point::new(10, 5));
    }

    #[test]
    fn right_release_outside_host_is_ignored() {
        let small_host = Rect::new(0, 0, 10, 10);
        let mut menu =
            Menu::new(small_host, MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        assert!(!menu.handle_event(&up(MouseButton::Right, 50, 5), host()));
        assert!(!menu.is_open());
    }

    #[test]
    fn hook_runs_after_target_before_show_and_affects_layout() {
        let observed = Rc::new(RefCell::new(None));
        let observed_in_hook = Rc::clone(&observed);
        let options = MenuOptions::new()
            .item(MenuItem::button("short").with_id("a"))
            .on_before_open(move |menu| {
                *observed_in_hook.borrow_mut() = Some((menu.current_target(), menu.is_open()));
                menu.item_mut("a")
                    .unwrap()
                    .set_content("a much longer content string");
            });
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 3, 3);

        assert_eq!(
            *observed.borrow(),
            Some((Some(Point::new(3, 3)), false)),
        );
        // 28 columns of content plus the border.
        assert_eq!(menu.area().unwrap().width, 28 + 2);
    }

    #[test]
    fn popup_is_clamped_near_the_viewport_corner() {
        let options = MenuOptions::new()
            .item(MenuItem::button("hello"))
            .item(MenuItem::button("world"));
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 79, 23);

        let area = menu.area().unwrap();
        assert!(area.right() <= 80);
        assert!(area.bottom() <= 24);
    }

    #[test]
    fn click_closes_then_fires_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_in_handler = Rc::clone(&log);
        let options = MenuOptions::new().item(
            MenuItem::button("copy")
                .with_id("copy")
                .on_click(move |menu, item| {
                    log_in_handler
                        .borrow_mut()
                        .push((item.id().unwrap().to_string(), menu.is_open()));
                }),
        );
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(!menu.is_open());
        assert_eq!(*log.borrow(), vec![("copy".to_string(), false)]);
    }

    #[test]
    fn disabled_item_swallows_release_without_firing() {
        let fired = Rc::new(RefCell::new(0));
        let fired_in_handler = Rc::clone(&fired);
        let options = MenuOptions::new().item(
            MenuItem::button("nope")
                .with_disabled(true)
                .on_click(move |_, _| *fired_in_handler.borrow_mut() += 1),
        );
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(menu.is_open());
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn checkbox_flips_once_and_handler_sees_new_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in_handler = Rc::clone(&seen);
        let options = MenuOptions::new().item(
            MenuItem::checkbox("wrap")
                .with_id("wrap")
                .on_click(move |_, item| seen_in_handler.borrow_mut().push(item.checked())),
        );
        let mut menu = Menu::new(host(), options).unwrap();

        open(&mut menu, 10, 5);
        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(menu.item("wrap").unwrap().checked());

        open(&mut menu, 10, 5);
        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(!menu.item("wrap").unwrap().checked());

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn label_and_rule_releases_are_inert() {
        let options = MenuOptions::new()
            .item(MenuItem::label("header"))
            .item(MenuItem::rule());
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        for idx in 0..2 {
            let (x, y) = row_point(&menu, idx);
            assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
            assert!(menu.is_open());
        }
    }

    #[test]
    fn outside_press_light_dismisses() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        assert!(menu.handle_event(&down(MouseButton::Left, 70, 20), host()));
        assert!(!menu.is_open());
        // Target survives close.
        assert_eq!(menu.current_target(), Some(Point::new(10, 5)));
    }

    #[test]
    fn right_click_elsewhere_reopens_at_new_position() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        assert!(menu.handle_event(&down(MouseButton::Right, 40, 10), host()));
        assert!(!menu.is_open());
        open(&mut menu, 40, 10);
        assert_eq!(menu.current_target(), Some(Point::new(40, 10)));
    }

    #[test]
    fn escape_closes() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        assert!(menu.handle_event(&key(KeyCode::Escape), host()));
        assert!(!menu.is_open());
    }

    #[test]
    fn keys_pass_through_without_a_focused_input() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        assert!(!menu.handle_event(&key(KeyCode::Char('q')), host()));
        assert!(menu.is_open());
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        let release = Event::Key(KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release));
        assert!(!menu.handle_event(&release, host()));
        assert!(menu.is_open());
    }

    #[test]
    fn input_focuses_edits_and_submits() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let submitted_in_handler = Rc::clone(&submitted);
        let options = MenuOptions::new()
            .item(MenuItem::button("a"))
            .item(
                MenuItem::input("name")
                    .with_id("name")
                    .on_submit(move |menu, item| {
                        submitted_in_handler
                            .borrow_mut()
                            .push((item.value().to_string(), menu.is_open()));
                    }),
            );
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        let (x, y) = row_point(&menu, 1);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(menu.is_open());

        assert!(menu.handle_event(&key(KeyCode::Char('h')), host()));
        assert!(menu.handle_event(&key(KeyCode::Char('i')), host()));
        assert_eq!(menu.item("name").unwrap().value(), "hi");

        assert!(menu.handle_event(&key(KeyCode::Enter), host()));
        assert!(!menu.is_open());
        assert_eq!(*submitted.borrow(), vec![("hi".to_string(), false)]);
    }

    #[test]
    fn enter_during_composition_does_not_submit() {
        let submitted = Rc::new(RefCell::new(0));
        let submitted_in_handler = Rc::clone(&submitted);
        let options = MenuOptions::new().item(
            MenuItem::input("q")
                .with_id("q")
                .on_submit(move |_, _| *submitted_in_handler.borrow_mut() += 1),
        );
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);
        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));

        assert!(menu.handle_event(&Event::Ime(ImeEvent::start()), host()));
        assert!(menu.handle_event(&Event::Ime(ImeEvent::update("かな")), host()));
        assert!(menu.handle_event(&key(KeyCode::Enter), host()));
        assert!(menu.is_open());
        assert_eq!(*submitted.borrow(), 0);

        assert!(menu.handle_event(&Event::Ime(ImeEvent::commit("仮名")), host()));
        assert!(menu.handle_event(&key(KeyCode::Enter), host()));
        assert!(!menu.is_open());
        assert_eq!(*submitted.borrow(), 1);
        assert_eq!(menu.item("q").unwrap().value(), "仮名");
    }

    #[test]
    fn disabled_input_takes_no_focus_and_no_edits() {
        let options = MenuOptions::new().item(
            MenuItem::input("locked")
                .with_id("locked")
                .with_disabled(true),
        );
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(!menu.handle_event(&key(KeyCode::Char('x')), host()));
        assert_eq!(menu.item("locked").unwrap().value(), "");
    }

    #[test]
    fn handlers_can_reach_sibling_items() {
        let options = MenuOptions::new()
            .item(MenuItem::button("toggle").with_id("a").on_click(|menu, _| {
                menu.item_mut("b").unwrap().set_disabled(true);
            }))
            .item(MenuItem::button("other").with_id("b"));
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(menu.item("b").unwrap().disabled());
    }

    #[test]
    fn handler_installed_inside_callback_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_outer = Rc::clone(&log);
        let options = MenuOptions::new().item(
            MenuItem::button("once")
                .with_id("once")
                .on_click(move |_, item| {
                    log_outer.borrow_mut().push("first");
                    let log_inner = Rc::clone(&log_outer);
                    *item = std::mem::replace(item, MenuItem::button("x"))
                        .on_click(move |_, _| log_inner.borrow_mut().push("second"));
                }),
        );
        let mut menu = Menu::new(host(), options).unwrap();

        open(&mut menu, 10, 5);
        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));

        open(&mut menu, 10, 5);
        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn fit_content_row_only_responds_over_its_content() {
        let fired = Rc::new(RefCell::new(0));
        let fired_in_handler = Rc::clone(&fired);
        let options = MenuOptions::new()
            .item(MenuItem::button("a long full-width row"))
            .item(
                MenuItem::button("ok")
                    .with_fit_content(true)
                    .on_click(move |_, _| *fired_in_handler.borrow_mut() += 1),
            );
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 10, 5);

        // Past the two columns of "ok": swallowed, nothing fires.
        let (x, y) = row_point(&menu, 1);
        assert!(menu.handle_event(&up(MouseButton::Left, x + 5, y), host()));
        assert!(menu.is_open());
        assert_eq!(*fired.borrow(), 0);

        // On the content: fires.
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));
        assert!(!menu.is_open());
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn border_release_is_consumed_without_effect() {
        let mut menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        open(&mut menu, 10, 5);
        let area = menu.area().unwrap();
        assert!(menu.handle_event(&up(MouseButton::Left, area.x, area.y), host()));
        assert!(menu.is_open());
    }

    #[test]
    fn render_draws_frame_rows_and_marks() {
        let options = MenuOptions::new()
            .item(MenuItem::button("copy"))
            .item(MenuItem::rule())
            .item(MenuItem::checkbox("wrap").with_checked(true))
            .item(MenuItem::label("note"));
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 2, 1);

        let mut surface = Surface::new(80, 24);
        menu.render(&mut surface);

        let area = menu.area().unwrap();
        assert_eq!(surface.get(area.x, area.y).unwrap().ch, '┌');
        assert_eq!(
            surface.get(area.right() - 1, area.bottom() - 1).unwrap().ch,
            '┘'
        );

        assert!(surface.row_text(area.y + 1).contains("copy"));
        assert!(surface.row_text(area.y + 2).contains("├"));
        assert!(surface.row_text(area.y + 2).contains("┤"));
        assert!(surface.row_text(area.y + 3).contains("✔ wrap"));
        assert!(surface.row_text(area.y + 4).contains("note"));
    }

    #[test]
    fn render_dims_disabled_rows_and_placeholders() {
        let options = MenuOptions::new()
            .item(MenuItem::button("off").with_disabled(true))
            .item(MenuItem::input("name").with_placeholder("type here"));
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 0, 0);

        let mut surface = Surface::new(80, 24);
        menu.render(&mut surface);

        let area = menu.area().unwrap();
        let first = surface.get(area.x + 1, area.y + 1).unwrap();
        assert_eq!(first.ch, 'o');
        assert!(first.attrs.contains(CellAttrs::DIM));

        // "name: " then dimmed placeholder.
        let row = surface.row_text(area.y + 2);
        assert!(row.contains("name: type here"));
        let field_x = area.x + 1 + 6;
        assert!(
            surface
                .get(field_x, area.y + 2)
                .unwrap()
                .attrs
                .contains(CellAttrs::DIM)
        );
    }

    #[test]
    fn render_shows_cursor_and_preedit_on_focused_input() {
        let options = MenuOptions::new().item(MenuItem::input("q").with_value("ab"));
        let mut menu = Menu::new(host(), options).unwrap();
        open(&mut menu, 0, 0);
        let (x, y) = row_point(&menu, 0);
        assert!(menu.handle_event(&up(MouseButton::Left, x, y), host()));

        let mut surface = Surface::new(80, 24);
        menu.render(&mut surface);
        // Cursor sits after "ab" (value ends there).
        let field_x = x + 3; // "q: "
        let cursor = surface.get(field_x + 2, y).unwrap();
        assert!(cursor.attrs.contains(CellAttrs::REVERSE));

        assert!(menu.handle_event(&Event::Ime(ImeEvent::start()), host()));
        assert!(menu.handle_event(&Event::Ime(ImeEvent::update("x")), host()));
        let mut surface = Surface::new(80, 24);
        menu.render(&mut surface);
        let preedit = surface.get(field_x + 2, y).unwrap();
        assert_eq!(preedit.ch, 'x');
        assert!(preedit.attrs.contains(CellAttrs::UNDERLINE));
    }

    #[test]
    fn render_while_closed_is_a_noop() {
        let menu = Menu::new(host(), MenuOptions::new().item(MenuItem::button("a"))).unwrap();
        let mut surface = Surface::new(10, 4);
        menu.render(&mut surface);
        assert_eq!(surface, Surface::new(10, 4));
    }
}
