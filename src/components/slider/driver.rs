use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use std::time::Duration;
use tracing::debug;

use super::{Slider, SliderEffect, SliderInput};

/// Drive a slider on tokio time until the input channel closes or the view goes away.
///
/// Returns the slider so callers can inspect its final state.
pub async fn run(
    mut slider: Slider,
    mut inputs: mpsc::Receiver<SliderInput>,
    effects: mpsc::UnboundedSender<SliderEffect>,
) -> Slider {
    if slider.is_inert() {
        debug!("Slider has no items, not starting");
        return slider;
    }

    let origin = Instant::now();
    let elapsed_ms = || origin.elapsed().as_millis() as u64;

    if !emit(&effects, slider.mount(elapsed_ms())) {
        return slider;
    }

    loop {
        let deadline = slider
            .next_deadline()
            .map(|ms| origin + Duration::from_millis(ms));

        let batch = tokio::select! {
            input = inputs.recv() => match input {
                Some(input) => slider.handle(input, elapsed_ms()),
                None => break,
            },
            _ = wait_until(deadline) => slider.advance(elapsed_ms()),
        };

        if !emit(&effects, batch) {
            break;
        }
    }

    debug!("Slider driver stopped at index {}", slider.index());
    slider
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn emit(effects: &mpsc::UnboundedSender<SliderEffect>, batch: Vec<SliderEffect>) -> bool {
    batch.into_iter().all(|effect| effects.send(effect).is_ok())
}
