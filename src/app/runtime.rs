// SPDX-License-Identifier: GPL-3.0-only

//! Event loop for the camera screen
//!
//! Every input (gestures, lifecycle, device notifications, backend callbacks
//! and delayed messages) goes through one unbounded FIFO channel consumed by a
//! single task, so handlers never run concurrently and events are handled in
//! the order they were observed.

use crate::app::state::{CameraScreen, Effect, Message};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

pub struct Runtime {
    screen: CameraScreen,
    receiver: UnboundedReceiver<Message>,
}

impl Runtime {
    pub fn new(screen: CameraScreen, receiver: UnboundedReceiver<Message>) -> Self {
        Self { screen, receiver }
    }

    /// Sender for input sources
    pub fn sender(&self) -> UnboundedSender<Message> {
        self.screen.sender()
    }

    pub fn screen(&self) -> &CameraScreen {
        &self.screen
    }

    /// Process messages until [`Message::Quit`] arrives, then hand the screen back
    pub async fn run(mut self) -> CameraScreen {
        info!("Camera screen runtime started");
        while let Some(message) = self.receiver.recv().await {
            if matches!(message, Message::Quit) {
                break;
            }
            debug!(?message, "Handling message");
            let effect = self.screen.update(message);
            self.spawn_effect(effect);
        }
        info!("Camera screen runtime stopped");
        self.screen
    }

    /// Schedule delayed messages back onto the channel
    fn spawn_effect(&self, effect: Effect) {
        for (after, message) in effect.into_delays() {
            let sender = self.screen.sender();
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                // Receiver gone means the runtime has stopped
                let _ = sender.send(message);
            });
        }
    }
}
