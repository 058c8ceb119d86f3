//! One-at-a-time image slider: auto-rotate, arrows, dots, pause on hover, swipe.
//!
//! The slider is a plain state machine fed with millisecond timestamps. It
//! never sleeps itself; callers (see [`driver`]) ask for the next deadline and
//! call [`Slider::advance`] when it is reached.

pub mod driver;

use crate::config::SliderConfig;
use crate::models::{CatalogItem, DeliveryItem};
use crate::parsers::{CurrencyFormatter, ImageFallback};
use crate::view::{Element, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct SlideItem {
    pub image_source: String,
    pub image_candidates: Vec<String>,
    pub alt: String,
    pub caption: Vec<Node>,
}

impl SlideItem {
    pub fn from_catalog(item: &CatalogItem, fmt: &CurrencyFormatter) -> Self {
        let alt = [&item.name, &item.brand, &item.category]
            .iter()
            .find_map(|f| f.as_deref())
            .unwrap_or("Image")
            .to_string();

        let price = item
            .market_price
            .map(|p| fmt.format(p))
            .or_else(|| item.market_price_raw.clone());

        Self {
            image_source: item.image_source.clone(),
            image_candidates: item.image_candidates.clone(),
            alt,
            caption: caption_nodes(
                item.name.as_deref(),
                item.brand.as_deref(),
                item.category.as_deref(),
                item.year,
                price.as_deref(),
            ),
        }
    }

    pub fn from_delivery(item: &DeliveryItem) -> Self {
        Self {
            image_source: item.image_source.clone(),
            image_candidates: item.image_candidates.clone(),
            alt: item.caption.clone().unwrap_or_else(|| "Image".to_string()),
            caption: caption_nodes(item.caption.as_deref(), None, None, None, None),
        }
    }
}

/// `<strong>name</strong> — brand · category (year) · price`, each part only when present.
pub fn caption_nodes(
    name: Option<&str>,
    brand: Option<&str>,
    category: Option<&str>,
    year: Option<i32>,
    price: Option<&str>,
) -> Vec<Node> {
    let mut nodes = Vec::new();
    if let Some(name) = name {
        nodes.push(Element::new("strong").text(name).into());
    }
    if let Some(brand) = brand {
        nodes.push(Node::text(format!(" — {}", brand)));
    }
    if let Some(category) = category {
        nodes.push(Node::text(format!(" · {}", category)));
    }
    if let Some(year) = year {
        nodes.push(Node::text(format!(" ({})", year)));
    }
    if let Some(price) = price {
        nodes.push(Node::text(format!(" · {}", price)));
    }
    nodes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderState {
    Idle { index: usize },
    Transitioning { index: usize, direction: Direction },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame {
    pub index: usize,
    pub src: String,
    pub alt: String,
    pub caption: Vec<Node>,
}

/// What the view has to do in response to an input or a deadline.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderEffect {
    /// Start the exit animation on the current picture.
    MarkExiting,
    /// Swap picture and caption.
    ShowSlide(SlideFrame),
    MarkEntering,
    ClearEntering,
    ActiveDot(usize),
    /// Replace the picture URL after a load failure.
    SetImage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Swap(usize),
    ClearEnter,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    at: u64,
    seq: u64,
    step: Step,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderInput {
    Next,
    Prev,
    GoTo(usize),
    PointerEnter,
    PointerLeave,
    TouchStart(f64),
    TouchEnd(f64),
    ImageFailed,
}

pub struct Slider {
    items: Vec<SlideItem>,
    timings: SliderConfig,
    state: SliderState,
    index: usize,
    /// The single auto-advance deadline. Replaced on reset, never stacked.
    timer: Option<u64>,
    scheduled: Vec<Scheduled>,
    next_seq: u64,
    touch_start_x: Option<f64>,
    image: ImageFallback,
}

impl Slider {
    pub fn new(items: Vec<SlideItem>, timings: SliderConfig) -> Self {
        let image = ImageFallback::new(
            items
                .first()
                .map(|i| i.image_candidates.as_slice())
                .unwrap_or_default(),
        );
        Self {
            items,
            timings,
            state: SliderState::Idle { index: 0 },
            index: 0,
            timer: None,
            scheduled: Vec::new(),
            next_seq: 0,
            touch_start_x: None,
            image,
        }
    }

    pub fn is_inert(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> SliderState {
        self.state
    }

    pub fn items(&self) -> &[SlideItem] {
        &self.items
    }

    pub fn timer_deadline(&self) -> Option<u64> {
        self.timer
    }

    /// Earliest pending deadline, auto-advance or animation step.
    pub fn next_deadline(&self) -> Option<u64> {
        let step = self.scheduled.iter().map(|s| s.at).min();
        match (self.timer, step) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// First paint without animation, then start rotating.
    pub fn mount(&mut self, now: u64) -> Vec<SliderEffect> {
        if self.is_inert() {
            return Vec::new();
        }
        let mut effects = vec![SliderEffect::ShowSlide(self.frame(self.index))];
        self.image = ImageFallback::new(&self.items[self.index].image_candidates);
        effects.push(SliderEffect::ActiveDot(self.index));
        self.start_timer(now);
        effects
    }

    pub fn handle(&mut self, input: SliderInput, now: u64) -> Vec<SliderEffect> {
        match input {
            SliderInput::Next => self.next(now),
            SliderInput::Prev => self.prev(now),
            SliderInput::GoTo(index) => self.go_to(index, now),
            SliderInput::PointerEnter => {
                self.pointer_enter();
                Vec::new()
            }
            SliderInput::PointerLeave => {
                self.pointer_leave(now);
                Vec::new()
            }
            SliderInput::TouchStart(x) => {
                self.touch_start(x);
                Vec::new()
            }
            SliderInput::TouchEnd(x) => self.touch_end(x, now),
            SliderInput::ImageFailed => self.image_failed(),
        }
    }

    /// Arrow "next": advance and restart the timer.
    pub fn next(&mut self, now: u64) -> Vec<SliderEffect> {
        if self.is_inert() {
            return Vec::new();
        }
        let effects = self.show(self.index as isize + 1, Direction::Forward, now);
        self.reset_timer(now);
        effects
    }

    pub fn prev(&mut self, now: u64) -> Vec<SliderEffect> {
        if self.is_inert() {
            return Vec::new();
        }
        let effects = self.show(self.index as isize - 1, Direction::Backward, now);
        self.reset_timer(now);
        effects
    }

    /// Dot click.
    pub fn go_to(&mut self, index: usize, now: u64) -> Vec<SliderEffect> {
        if self.is_inert() {
            return Vec::new();
        }
        let effects = self.show(index as isize, Direction::Jump, now);
        self.reset_timer(now);
        effects
    }

    pub fn pointer_enter(&mut self) {
        self.stop_timer();
    }

    pub fn pointer_leave(&mut self, now: u64) {
        if !self.is_inert() {
            self.start_timer(now);
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = Some(x);
    }

    pub fn touch_end(&mut self, x: f64, now: u64) -> Vec<SliderEffect> {
        let Some(start) = self.touch_start_x.take() else {
            return Vec::new();
        };
        let dx = x - start;
        if dx.abs() <= self.timings.swipe_threshold_px {
            return Vec::new();
        }
        if dx < 0.0 {
            self.next(now)
        } else {
            self.prev(now)
        }
    }

    /// The shown picture failed to load; try the next candidate or the placeholder.
    pub fn image_failed(&mut self) -> Vec<SliderEffect> {
        if self.is_inert() {
            return Vec::new();
        }
        self.image
            .on_error()
            .map(SliderEffect::SetImage)
            .into_iter()
            .collect()
    }

    /// Run every deadline up to `now`, in time order.
    pub fn advance(&mut self, now: u64) -> Vec<SliderEffect> {
        let mut effects = Vec::new();
        if self.is_inert() {
            return effects;
        }

        loop {
            let due_step = self
                .scheduled
                .iter()
                .enumerate()
                .filter(|(_, s)| s.at <= now)
                .min_by_key(|(_, s)| (s.at, s.seq))
                .map(|(i, s)| (i, *s));
            let due_timer = self.timer.filter(|at| *at <= now);

            match (due_step, due_timer) {
                (Some((i, step)), timer) if timer.map_or(true, |t| step.at <= t) => {
                    self.scheduled.remove(i);
                    self.run_step(step, &mut effects);
                }
                (_, Some(at)) => {
                    // setInterval cadence: the next tick is relative to this one
                    self.timer = Some(at + self.timings.interval_ms);
                    let index = self.index as isize + 1;
                    effects.extend(self.show(index, Direction::Forward, at));
                }
                _ => break,
            }
        }

        effects
    }

    fn run_step(&mut self, scheduled: Scheduled, effects: &mut Vec<SliderEffect>) {
        match scheduled.step {
            Step::Swap(index) => {
                self.image = ImageFallback::new(&self.items[index].image_candidates);
                effects.push(SliderEffect::ShowSlide(self.frame(index)));
                effects.push(SliderEffect::MarkEntering);
                self.schedule(
                    scheduled.at + self.timings.enter_duration_ms,
                    Step::ClearEnter,
                );
            }
            Step::ClearEnter => {
                effects.push(SliderEffect::ClearEntering);
                if self.scheduled.is_empty() {
                    self.state = SliderState::Idle { index: self.index };
                }
            }
        }
    }

    fn show(&mut self, index: isize, direction: Direction, now: u64) -> Vec<SliderEffect> {
        let len = self.items.len() as isize;
        self.index = index.rem_euclid(len) as usize;
        self.state = SliderState::Transitioning {
            index: self.index,
            direction,
        };
        self.schedule(now + self.timings.exit_delay_ms, Step::Swap(self.index));
        vec![
            SliderEffect::MarkExiting,
            SliderEffect::ActiveDot(self.index),
        ]
    }

    fn schedule(&mut self, at: u64, step: Step) {
        self.scheduled.push(Scheduled {
            at,
            seq: self.next_seq,
            step,
        });
        self.next_seq += 1;
    }

    fn frame(&self, index: usize) -> SlideFrame {
        let item = &self.items[index];
        SlideFrame {
            index,
            src: item.image_source.clone(),
            alt: item.alt.clone(),
            caption: item.caption.clone(),
        }
    }

    fn start_timer(&mut self, now: u64) {
        self.stop_timer();
        self.timer = Some(now + self.timings.interval_ms);
    }

    fn stop_timer(&mut self) {
        self.timer = None;
    }

    fn reset_timer(&mut self, now: u64) {
        self.stop_timer();
        self.start_timer(now);
    }
}

/// Static markup for a slider mount: figure, arrows and one dot per slide.
pub fn slider_view(id: &str, items: &[SlideItem]) -> Option<Node> {
    let first = items.first()?;

    let figure = Element::new("figure")
        .child(
            Element::new("img")
                .attr("src", first.image_source.clone())
                .attr("alt", first.alt.clone())
                .attr("data-candidates", first.image_candidates.join(" "))
                .attr("loading", "lazy"),
        )
        .child(Element::new("figcaption").children(first.caption.clone()));

    let dots = Element::new("div").class("slider-dots").children(
        items.iter().enumerate().map(|(idx, _)| {
            let mut dot = Element::new("button")
                .class("slider-dot")
                .attr("type", "button")
                .attr("aria-label", format!("Go to slide {}", idx + 1));
            dot.toggle_class("active", idx == 0);
            dot
        }),
    );

    Some(
        Element::new("div")
            .id(id)
            .class("slider")
            .child(figure)
            .child(
                Element::new("button")
                    .class("slider-arrow prev")
                    .attr("type", "button")
                    .attr("aria-label", "Previous")
                    .text("‹"),
            )
            .child(
                Element::new("button")
                    .class("slider-arrow next")
                    .attr("type", "button")
                    .attr("aria-label", "Next")
                    .text("›"),
            )
            .child(dots)
            .into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PLACEHOLDER_IMAGE;
    use crate::parsers::resolve_image;

    fn items(n: usize) -> Vec<SlideItem> {
        (0..n)
            .map(|i| {
                let image = resolve_image(&format!("https://example.com/{}.jpg", i));
                SlideItem {
                    image_source: image.source,
                    image_candidates: image.candidates,
                    alt: format!("Car {}", i),
                    caption: caption_nodes(Some(&format!("Car {}", i)), None, None, None, None),
                }
            })
            .collect()
    }

    fn slider(n: usize) -> Slider {
        let mut slider = Slider::new(items(n), SliderConfig::default());
        slider.mount(0);
        slider
    }

    fn shown(effects: &[SliderEffect]) -> Vec<usize> {
        effects
            .iter()
            .filter_map(|e| match e {
                SliderEffect::ShowSlide(frame) => Some(frame.index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mount_renders_first_without_animation() {
        let mut slider = Slider::new(items(3), SliderConfig::default());
        let effects = slider.mount(0);
        assert_eq!(shown(&effects), vec![0]);
        assert!(!effects.contains(&SliderEffect::MarkExiting));
        assert_eq!(slider.timer_deadline(), Some(6000));
    }

    #[test]
    fn test_empty_slider_is_inert() {
        let mut slider = Slider::new(Vec::new(), SliderConfig::default());
        assert!(slider.mount(0).is_empty());
        assert!(slider.next(10).is_empty());
        assert!(slider.prev(10).is_empty());
        assert!(slider.go_to(3, 10).is_empty());
        slider.pointer_leave(10);
        assert!(slider.advance(100_000).is_empty());
        assert_eq!(slider.next_deadline(), None);
    }

    #[test]
    fn test_next_then_prev_round_trips() {
        for n in 1..6 {
            for start in 0..n {
                let mut slider = slider(n);
                slider.go_to(start, 0);
                slider.next(1);
                slider.prev(2);
                assert_eq!(slider.index(), start, "n={} start={}", n, start);
            }
        }
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let mut slider = slider(4);
        slider.prev(0);
        assert_eq!(slider.index(), 3);
        slider.next(0);
        assert_eq!(slider.index(), 0);
        slider.go_to(9, 0);
        assert_eq!(slider.index(), 1);
    }

    #[test]
    fn test_two_phase_transition() {
        let mut slider = slider(3);
        let effects = slider.next(1000);
        assert_eq!(
            effects,
            vec![SliderEffect::MarkExiting, SliderEffect::ActiveDot(1)]
        );
        assert_eq!(
            slider.state(),
            SliderState::Transitioning {
                index: 1,
                direction: Direction::Forward
            }
        );

        assert!(slider.advance(1199).is_empty());
        let swap = slider.advance(1200);
        assert_eq!(shown(&swap), vec![1]);
        assert_eq!(swap.last(), Some(&SliderEffect::MarkEntering));

        assert!(slider.advance(1719).is_empty());
        assert_eq!(slider.advance(1720), vec![SliderEffect::ClearEntering]);
        assert_eq!(slider.state(), SliderState::Idle { index: 1 });
    }

    #[test]
    fn test_auto_advance_every_interval() {
        let mut slider = slider(3);
        let effects = slider.advance(6000 + 200 + 520);
        assert_eq!(shown(&effects), vec![1]);
        let effects = slider.advance(12_000 + 720);
        assert_eq!(shown(&effects), vec![2]);
        let effects = slider.advance(18_000 + 720);
        assert_eq!(shown(&effects), vec![0]);
    }

    #[test]
    fn test_manual_interaction_never_stacks_timers() {
        let mut slider = slider(5);
        for t in [100, 200, 300, 400] {
            slider.next(t);
        }
        assert_eq!(slider.index(), 4);
        slider.advance(1000);

        // one interval after the last click: exactly one auto step
        let effects = slider.advance(6400 + 720);
        assert_eq!(shown(&effects), vec![0]);
        assert_eq!(slider.index(), 0);
        assert_eq!(slider.timer_deadline(), Some(12_400));
    }

    #[test]
    fn test_pause_on_hover() {
        let mut slider = slider(3);
        slider.pointer_enter();
        assert!(slider.advance(60_000).is_empty());
        assert_eq!(slider.index(), 0);

        slider.pointer_leave(60_000);
        let effects = slider.advance(66_000 + 720);
        assert_eq!(shown(&effects), vec![1]);
    }

    #[test]
    fn test_swipe_threshold_and_direction() {
        let mut slider = slider(3);
        slider.touch_start(200.0);
        assert!(slider.touch_end(170.0, 0).is_empty());
        assert_eq!(slider.index(), 0);

        slider.touch_start(200.0);
        slider.touch_end(100.0, 0);
        assert_eq!(slider.index(), 1);

        slider.touch_start(100.0);
        slider.touch_end(200.0, 0);
        assert_eq!(slider.index(), 0);

        assert!(slider.touch_end(0.0, 0).is_empty());
    }

    #[test]
    fn test_superseded_transition_settles_on_latest() {
        let mut slider = slider(4);
        slider.next(0);
        slider.next(50);
        let effects = slider.advance(2000);
        assert_eq!(shown(&effects), vec![1, 2]);
        assert_eq!(slider.state(), SliderState::Idle { index: 2 });
    }

    #[test]
    fn test_image_failure_walks_candidates() {
        let drive = resolve_image("https://drive.google.com/file/d/ABCDEFGHIJKLMNOPQRSTUVWXY0123/view");
        let item = SlideItem {
            image_source: drive.source.clone(),
            image_candidates: drive.candidates.clone(),
            alt: "x".into(),
            caption: Vec::new(),
        };
        let mut slider = Slider::new(vec![item], SliderConfig::default());
        slider.mount(0);

        assert_eq!(
            slider.image_failed(),
            vec![SliderEffect::SetImage(drive.candidates[1].clone())]
        );
        assert_eq!(
            slider.image_failed(),
            vec![SliderEffect::SetImage(drive.candidates[2].clone())]
        );
        assert_eq!(
            slider.image_failed(),
            vec![SliderEffect::SetImage(PLACEHOLDER_IMAGE.to_string())]
        );
        assert!(slider.image_failed().is_empty());
    }

    #[test]
    fn test_caption_composition() {
        let item = CatalogItem {
            name: Some("Harrier".into()),
            brand: Some("Toyota".into()),
            year: Some(2018),
            market_price: Some(21500.0),
            ..Default::default()
        };
        let slide = SlideItem::from_catalog(&item, &CurrencyFormatter::default());
        let caption: Node = Element::new("figcaption").children(slide.caption).into();
        assert_eq!(caption.text_content(), "Harrier — Toyota (2018) · $21,500");
        assert_eq!(slide.alt, "Harrier");

        let bare = SlideItem::from_catalog(&CatalogItem::default(), &CurrencyFormatter::default());
        assert!(bare.caption.is_empty());
        assert_eq!(bare.alt, "Image");
    }

    #[test]
    fn test_slider_view() {
        assert!(slider_view("slider-cars", &[]).is_none());
        let view = slider_view("slider-cars", &items(3)).unwrap();
        let html = crate::view::render(&view);
        assert_eq!(html.matches("slider-dot").count(), 4); // wrapper + 3 dots
        assert!(html.contains("slider-dot active"));
        assert!(html.contains("Go to slide 3"));
    }
}
