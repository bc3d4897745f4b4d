use std::time::Instant;

use kiss3d::event::{Action, Key, WindowEvent};

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_RESET_CAMERA: Key = Key::R;
const KEY_SPEED_UP: Key = Key::RBracket;
const KEY_SLOW_DOWN: Key = Key::LBracket;
const KEY_HIDE_PANEL: Key = Key::I;
const KEY_TOGGLE_HELP: Key = Key::H;

const SPEED_FACTOR: f32 = 2.0;

/// Things the keyboard asks the rest of the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ResetCamera,
    /// Multiply the focused body's speed (every body's, if none is focused)
    ScaleSpeed(f32),
    HidePanel,
}

pub struct Controller {
    paused: bool,
    show_help: bool,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new(paused: bool) -> Self {
        Controller {
            paused,
            show_help: true,
            fps_counter: FpsCounter::new(1000),
        }
    }

    /// Handles the keys the controller owns itself (pause, help), and turns
    /// the rest into commands.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<Command> {
        match *event {
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                None
            }
            WindowEvent::Key(KEY_TOGGLE_HELP, Action::Press, _) => {
                self.show_help = !self.show_help;
                None
            }
            WindowEvent::Key(KEY_RESET_CAMERA, Action::Press, _) => Some(Command::ResetCamera),
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                Some(Command::ScaleSpeed(SPEED_FACTOR))
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                Some(Command::ScaleSpeed(SPEED_FACTOR.recip()))
            }
            WindowEvent::Key(KEY_HIDE_PANEL, Action::Press, _) => Some(Command::HidePanel),
            _ => None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

pub fn help_text() -> &'static str {
    "Drag: orbit    Right-drag: pan    Scroll: zoom
Click planet: focus    Click space: unfocus
Space: pause    R: reset camera
[ / ]: slower / faster    I: hide info    H: hide help"
}

#[cfg(test)]
mod tests {
    use kiss3d::event::Modifiers;

    use super::*;

    fn press(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    #[test]
    fn test_pause_toggles() {
        let mut controller = Controller::new(false);
        assert_eq!(controller.process_event(&press(Key::Space)), None);
        assert!(controller.is_paused());
        controller.process_event(&press(Key::Space));
        assert!(!controller.is_paused());

        // Releases don't count
        let release = WindowEvent::Key(Key::Space, Action::Release, Modifiers::empty());
        controller.process_event(&release);
        assert!(!controller.is_paused());
    }

    #[test]
    fn test_commands() {
        let mut controller = Controller::new(true);
        assert_eq!(
            controller.process_event(&press(Key::R)),
            Some(Command::ResetCamera)
        );
        assert_eq!(
            controller.process_event(&press(Key::RBracket)),
            Some(Command::ScaleSpeed(2.0))
        );
        assert_eq!(
            controller.process_event(&press(Key::LBracket)),
            Some(Command::ScaleSpeed(0.5))
        );
        assert_eq!(
            controller.process_event(&press(Key::I)),
            Some(Command::HidePanel)
        );
        assert_eq!(controller.process_event(&press(Key::Q)), None);

        assert!(controller.show_help());
        controller.process_event(&press(Key::H));
        assert!(!controller.show_help());
    }
}
