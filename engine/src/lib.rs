pub mod app;
pub mod assets;
pub mod audio;
pub mod graphics;
pub mod pixels_renderer;
pub mod sprite;
pub mod surface;
pub mod ui;

/// Deterministic game rules: a pure step from one state to the next.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Drives a `GameLogic` without a window, one input per frame.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    /// Starts from an existing state instead of `initial_state()`.
    pub fn from_state(game: G, state: G::State) -> Self {
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }

    /// Steps until `done` returns true for the current state or `max_frames` have run.
    pub fn run_until<F, P>(&mut self, max_frames: usize, mut input_for: F, mut done: P) -> usize
    where
        F: FnMut(usize, &G::State) -> G::Input,
        P: FnMut(&G::State) -> bool,
    {
        for _ in 0..max_frames {
            if done(&self.state) {
                break;
            }
            let input = input_for(self.frame, &self.state);
            self.step(input);
        }
        self.frame
    }

    pub fn reset(&mut self) {
        self.state = self.game.initial_state();
        self.frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Additive;

    impl GameLogic for Additive {
        type State = i32;
        type Input = i32;

        fn initial_state(&self) -> Self::State {
            0
        }

        fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
            *state + input
        }
    }

    #[test]
    fn runner_steps_and_counts_frames() {
        let mut runner = HeadlessRunner::new(Additive);
        runner.run([1, 2, 3]);
        assert_eq!(runner.frame(), 3);
        assert_eq!(runner.state(), &6);

        runner.reset();
        assert_eq!(runner.frame(), 0);
        assert_eq!(runner.state(), &0);
    }

    #[test]
    fn run_until_stops_on_predicate() {
        let mut runner = HeadlessRunner::from_state(Additive, 10);
        let frames = runner.run_until(100, |_, _| 5, |s| *s >= 30);
        assert_eq!(frames, 4);
        assert_eq!(runner.state(), &30);
    }

    #[test]
    fn run_until_respects_frame_cap() {
        let mut runner = HeadlessRunner::new(Additive);
        let frames = runner.run_until(7, |frame, _| frame as i32, |_| false);
        assert_eq!(frames, 7);
        assert_eq!(runner.state(), &21);
    }
}
