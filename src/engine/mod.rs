use crate::browser;
use anyhow::{anyhow, Error, Result};
// web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we control the closure creation and specify the expected type
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

pub mod input;
mod timer;

use input::Input;
pub use timer::Timer;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `delta` is the simulated step length in milliseconds
    fn update(&mut self, input: &Input, delta: f32);
    fn draw(&self, renderer: &Renderer);
}

// length of a frame in milliseconds
const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut events = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer {
            context: browser::context()?,
        };
        let mut input = Input::default();

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            input.process(&mut events);
            game_loop.accumulated_delta += (perf - game_loop.last_frame) as f32;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(&input, FRAME_SIZE);
                // clicks belong to the first step that sees them
                input.clear_clicks();
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);
            let _ = browser::request_animation_frame(f.borrow().as_ref().unwrap());
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

// ==================== Geometry ====================
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn scaled(&self, scale_x: f32, scale_y: f32) -> Size {
        Size {
            width: self.width * scale_x,
            height: self.height * scale_y,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn centered_on(center: Point, size: Size) -> Self {
        Rect::from_xywh(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.x() + self.width()
    }

    pub fn bottom(&self) -> f32 {
        self.y() + self.height()
    }

    #[cfg(test)]
    pub fn center(&self) -> Point {
        Point {
            x: self.x() + self.width() / 2.0,
            y: self.y() + self.height() / 2.0,
        }
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x() < other.right()
            && self.right() > other.x()
            && self.y() < other.bottom()
            && self.bottom() > other.y()
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x() && point.x <= self.right() && point.y >= self.y() && point.y <= self.bottom()
    }

    pub fn clamp(&self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.x(), self.right()),
            y: point.y.clamp(self.y(), self.bottom()),
        }
    }
}

// ==================== Rendering ====================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_px: f32,
    pub color: &'static str,
    pub background: Option<&'static str>,
    pub bold: bool,
    pub padding: (f32, f32),
}

impl TextStyle {
    pub const fn plain(font_px: f32, color: &'static str) -> Self {
        TextStyle {
            font_px,
            color,
            background: None,
            bold: false,
            padding: (0.0, 0.0),
        }
    }

    pub const fn boxed(font_px: f32, color: &'static str, background: &'static str) -> Self {
        TextStyle {
            font_px,
            color,
            background: Some(background),
            bold: false,
            padding: (20.0, 10.0),
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn with_padding(mut self, horizontal: f32, vertical: f32) -> Self {
        self.padding = (horizontal, vertical);
        self
    }

    fn font(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px sans-serif", weight, self.font_px)
    }
}

/// Box occupied by `text` centred on `center`
/// - glyph widths are estimated so hit boxes can be computed without a canvas
pub fn text_box(center: Point, text: &str, style: &TextStyle) -> Rect {
    let glyphs = text.chars().count() as f32;
    let (pad_x, pad_y) = style.padding;
    Rect::centered_on(
        center,
        Size {
            width: glyphs * style.font_px * 0.6 + pad_x * 2.0,
            height: style.font_px * 1.2 + pad_y * 2.0,
        },
    )
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.x().into(),
            rect.y().into(),
            rect.width().into(),
            rect.height().into(),
        );
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            rect.x().into(),
            rect.y().into(),
            rect.width().into(),
            rect.height().into(),
        );
    }

    pub fn fill_circle(&self, center: Point, radius: f32, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        let _ = self.context.arc(
            center.x.into(),
            center.y.into(),
            radius.into(),
            0.0,
            std::f64::consts::TAU,
        );
        self.context.fill();
    }

    pub fn stroke_rect(&self, rect: &Rect, color: &str) {
        self.context.set_stroke_style_str(color);
        self.context.stroke_rect(
            rect.x().into(),
            rect.y().into(),
            rect.width().into(),
            rect.height().into(),
        );
    }

    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) {
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.x().into(),
                destination.y().into(),
                destination.width().into(),
                destination.height().into(),
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    /// Blit `image` at its natural size times the scale, centred on `center`
    pub fn draw_centered(&self, image: &HtmlImageElement, center: Point, scale: (f32, f32)) {
        let size = image_size(image).scaled(scale.0, scale.1);
        self.draw_image(image, &Rect::centered_on(center, size));
    }

    /// Blit `image` scaled, with its bottom edge centred on `base`
    pub fn draw_standing(&self, image: &HtmlImageElement, base: Point, scale: f32) {
        let size = image_size(image).scaled(scale, scale);
        let destination = Rect::from_xywh(
            base.x - size.width / 2.0,
            base.y - size.height,
            size.width,
            size.height,
        );
        self.draw_image(image, &destination);
    }

    pub fn draw_text(&self, text: &str, center: Point, style: &TextStyle) {
        if let Some(background) = style.background {
            self.fill_rect(&text_box(center, text, style), background);
        }
        self.context.set_font(&style.font());
        self.context.set_fill_style_str(style.color);
        self.context.set_text_align("center");
        self.context.set_text_baseline("middle");
        let _ = self
            .context
            .fill_text(text, center.x.into(), center.y.into());
    }

    /// Text anchored by its left edge, used by the HUD counters
    pub fn draw_text_left(&self, text: &str, position: Point, style: &TextStyle) {
        self.context.set_font(&style.font());
        self.context.set_fill_style_str(style.color);
        self.context.set_text_align("left");
        self.context.set_text_baseline("top");
        let _ = self
            .context
            .fill_text(text, position.x.into(), position.y.into());
    }
}

pub fn image_size(image: &HtmlImageElement) -> Size {
    Size {
        width: image.natural_width() as f32,
        height: image.natural_height() as f32,
    }
}

pub trait DebugDraw {
    fn draw_debug(&self, renderer: &Renderer);
}

impl DebugDraw for Rect {
    fn draw_debug(&self, renderer: &Renderer) {
        renderer.stroke_rect(self, "#ff0000");
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let source_name = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine::load_image] Error loading image {}: {:#?}",
                source_name,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // ?? - Result<Result<(), Error>, oneshot::Canceled>
    // - first ? yields channel result : Result<(), Error>
    // - second ? yields image load result : () or propagating Error
    rx.await??;

    Ok(image)
}
