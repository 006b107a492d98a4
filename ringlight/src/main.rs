use std::time::Instant;

use iced::mouse;
use iced::widget::{button, canvas, column, container, mouse_area, text};
use iced::window;
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task, Theme};
use log::{debug, warn};
use ringlight_core::{
    Backdrop, GlowLayout, IndicatorView, IntensityController, RingLight, Size as SurfaceSize,
};

const WINDOW_WIDTH: f32 = 420.0;
const WINDOW_HEIGHT: f32 = 860.0;

// Stand-in for the camera feed.
const PREVIEW_BACKGROUND: Color = Color {
    r: 0.08,
    g: 0.08,
    b: 0.1,
    a: 1.0,
};
const GLOW_ALPHA: f32 = 0.85;

const INDICATOR_WIDTH_FRACTION: f32 = 0.6;
const INDICATOR_HEIGHT: f32 = 8.0;
const INDICATOR_BOTTOM_MARGIN: f32 = 96.0;

pub fn main() -> iced::Result {
    env_logger::init();

    iced::application(MirrorApp::default, MirrorApp::update, MirrorApp::view)
        .title("Ring Light Mirror")
        .window_size((WINDOW_WIDTH, WINDOW_HEIGHT))
        .subscription(MirrorApp::subscription)
        .theme(MirrorApp::theme)
        .run()
}

struct MirrorApp {
    controller: IntensityController,
    camera_permission: bool,

    drag: DragTracker,
}

#[derive(Debug, Clone)]
enum Message {
    // Drag gesture
    Pressed,
    Moved(Point),
    Released,
    Exited,

    // Frame loop and window
    Frame(Instant),
    Resized(Size),

    // Camera permission
    RequestPermission,
}

impl Default for MirrorApp {
    fn default() -> Self {
        let mut controller = IntensityController::tweened();
        if let Err(e) = controller.set_interaction_width(WINDOW_WIDTH) {
            warn!("keeping default reference span: {}", e);
        }

        Self {
            controller,
            camera_permission: false,
            drag: DragTracker::default(),
        }
    }
}

impl MirrorApp {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Pressed => match self.controller.gesture_start() {
                Ok(()) => self.drag.press(),
                Err(e) => debug!("press ignored: {}", e),
            },

            Message::Moved(position) => {
                if let Some(dx) = self.drag.move_to(position)
                    && let Err(e) = self.controller.gesture_update(dx)
                {
                    debug!("drag update ignored: {}", e);
                }
            }

            Message::Released => {
                let dx = self.drag.release();
                self.end_drag(dx);
            }

            Message::Exited => {
                let dx = self.drag.exit();
                self.end_drag(dx);
            }

            Message::Frame(now) => {
                self.controller.animator_mut().advance(now);
                self.controller.tick(now);
            }

            Message::Resized(size) => {
                if let Err(e) = self.controller.set_interaction_width(size.width) {
                    warn!("resize ignored: {}", e);
                }
            }

            Message::RequestPermission => {
                self.camera_permission = true;
            }
        }

        Task::none()
    }

    fn end_drag(&mut self, dx: Option<f32>) {
        let Some(dx) = dx else {
            return;
        };
        match self.controller.gesture_end(dx, Instant::now()) {
            Ok(settle) => debug!("settling to {}", settle.target),
            Err(e) => warn!("release ignored: {}", e),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match Backdrop::from_permission(self.camera_permission) {
            Backdrop::PermissionExplainer => {
                let content = column![
                    text("Camera access needed").size(24),
                    text("The mirror shows your front camera. Allow access to use the ring light.")
                        .size(14),
                    button("Allow camera").on_press(Message::RequestPermission),
                ]
                .spacing(15)
                .padding(20);

                container(content).center(Length::Fill).into()
            }

            Backdrop::CameraPreview => {
                let scene = canvas(Scene {
                    ring: RingLight::from_config(self.controller.config()),
                    intensity: self.controller.displayed_intensity(),
                    indicator: self.controller.indicator(),
                })
                .width(Length::Fill)
                .height(Length::Fill);

                mouse_area(scene)
                    .on_press(Message::Pressed)
                    .on_move(Message::Moved)
                    .on_release(Message::Released)
                    .on_exit(Message::Exited)
                    .into()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let resize = window::resize_events().map(|(_id, size)| Message::Resized(size));

        if self.controller.needs_frames() {
            Subscription::batch([resize, window::frames().map(Message::Frame)])
        } else {
            resize
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

// =============================================================================
// Pointer tracking
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Anchor {
    #[default]
    Released,
    // Pressed before any position was reported.
    Pending,
    At(Point),
}

/// Turns pointer events into horizontal drag translations.
#[derive(Debug, Default)]
struct DragTracker {
    cursor: Option<Point>,
    anchor: Anchor,
}

impl DragTracker {
    fn press(&mut self) {
        self.anchor = match self.cursor {
            Some(position) => Anchor::At(position),
            None => Anchor::Pending,
        };
    }

    /// Record a move; returns the translation while a drag is held.
    fn move_to(&mut self, position: Point) -> Option<f32> {
        self.cursor = Some(position);
        match self.anchor {
            Anchor::Released => None,
            Anchor::Pending => {
                self.anchor = Anchor::At(position);
                Some(0.0)
            }
            Anchor::At(anchor) => Some(position.x - anchor.x),
        }
    }

    /// End the drag; returns the final translation if one was held.
    fn release(&mut self) -> Option<f32> {
        match std::mem::take(&mut self.anchor) {
            Anchor::Released => None,
            Anchor::Pending => Some(0.0),
            Anchor::At(anchor) => Some(self.cursor.map_or(0.0, |cursor| cursor.x - anchor.x)),
        }
    }

    /// The pointer left the surface; its last position is no longer current.
    fn exit(&mut self) -> Option<f32> {
        let dx = self.release();
        self.cursor = None;
        dx
    }
}

// =============================================================================
// Scene
// =============================================================================

struct Scene {
    ring: RingLight,
    intensity: f32,
    indicator: IndicatorView,
}

impl<Message> canvas::Program<Message> for Scene {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), PREVIEW_BACKGROUND);

        let glow = self
            .ring
            .layout(self.intensity, SurfaceSize::new(bounds.width, bounds.height));
        draw_glow(&mut frame, &glow);
        draw_indicator(&mut frame, &self.indicator, bounds.size());

        vec![frame.into_geometry()]
    }
}

fn draw_glow(frame: &mut canvas::Frame, glow: &GlowLayout) {
    if glow.is_dark() {
        return;
    }

    let color = Color::from_rgba(1.0, 1.0, 1.0, GLOW_ALPHA * glow.alpha);
    for region in glow.regions().iter().filter(|region| !region.is_empty()) {
        frame.fill_rectangle(
            Point::new(region.x, region.y),
            Size::new(region.width, region.height),
            color,
        );
    }
}

fn draw_indicator(frame: &mut canvas::Frame, indicator: &IndicatorView, surface: Size) {
    if !indicator.is_drawn() {
        return;
    }

    let width = surface.width * INDICATOR_WIDTH_FRACTION * indicator.scale;
    let height = INDICATOR_HEIGHT * indicator.scale;
    let origin = Point::new(
        (surface.width - width) / 2.0,
        surface.height - INDICATOR_BOTTOM_MARGIN - height / 2.0,
    );

    frame.fill_rectangle(
        origin,
        Size::new(width, height),
        Color::from_rgba(1.0, 1.0, 1.0, 0.25 * indicator.opacity),
    );
    frame.fill_rectangle(
        origin,
        Size::new(width * indicator.fill, height),
        Color::from_rgba(1.0, 0.97, 0.9, 0.95 * indicator.opacity),
    );
}
