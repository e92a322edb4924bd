//! Whole games, played through the public API with timers fired by hand.

use std::time::Duration;

use rand::{rngs::SmallRng, Rng, SeedableRng};

use shellgame::{
    Animator, Config, CupRow, Difficulty, GameController, Instruction, Phase, Replies, ShellView,
    ShuffleStep, Status, TimerQueue, WakeupKind,
};

/// Everything a game needs, minus the terminal.
struct Table {
    gc: GameController<SmallRng>,
    timers: TimerQueue,
    replies: Replies,
    view: ShellView,
}

impl Table {
    fn new(cups: usize, difficulty: Difficulty, seed: u64) -> Self {
        let config = Config {
            cups,
            difficulty,
            seed: Some(seed),
            ..Default::default()
        };
        config.validate().unwrap();
        Self {
            gc: config.controller(),
            timers: TimerQueue::new(),
            replies: Replies::default(),
            view: ShellView::new(cups, difficulty),
        }
    }

    /// Show everything queued to the view, returning it too.
    fn flush(&mut self) -> Vec<Instruction> {
        let insts: Vec<_> = self.replies.drain().collect();
        for inst in &insts {
            self.view.message(inst);
        }
        insts
    }

    fn fire_next(&mut self) -> Option<WakeupKind> {
        let (_, wakeup) = self.timers.pop_next()?;
        self.gc.advance(wakeup, &mut self.timers, &mut self.replies);
        Some(wakeup.kind)
    }

    /// Start a game and fire timers until it wants a guess.
    fn play_to_guess(&mut self) -> Vec<Instruction> {
        self.gc.start_game(&mut self.timers, &mut self.replies);
        let mut all = self.flush();
        while self.gc.phase() != Phase::AwaitingGuess {
            self.fire_next().expect("game stalled before the guess");
            all.extend(self.flush());
        }
        all
    }

    fn guess(&mut self, slot: usize) -> Vec<Instruction> {
        self.gc
            .handle_selection(slot, &mut self.timers, &mut self.replies);
        self.flush()
    }
}

/// Follow the ball from `start` through `steps`, both by remapping the slot and by moving real cups.
fn trace(start: usize, steps: &[ShuffleStep]) -> (Vec<usize>, Option<usize>) {
    let mut secret = start;
    let mut seen = vec![];
    let mut row = CupRow::new(3);
    let ball = row.cup_at(start);
    for step in steps {
        secret = step.apply(secret);
        row.swap(step.a, step.b, Duration::ZERO);
        seen.push(secret);
    }
    (seen, row.slot_of(ball))
}

#[test]
fn swap_not_touching_the_ball_leaves_it() {
    // ball under slot 1, swap (0, 1) then (1, 2): the second swap doesn't involve slot 0
    let steps = [ShuffleStep { a: 0, b: 1 }, ShuffleStep { a: 1, b: 2 }];
    assert_eq!(trace(1, &steps), (vec![0, 0], Some(0)));
}

#[test]
fn ball_follows_chained_swaps() {
    let steps = [ShuffleStep { a: 0, b: 1 }, ShuffleStep { a: 0, b: 2 }];
    assert_eq!(trace(1, &steps), (vec![0, 2], Some(2)));
}

#[test]
fn guessing_the_final_slot_is_correct() {
    let mut t = (0..200)
        .map(|seed| {
            let mut t = Table::new(3, Difficulty::Easy, seed);
            t.play_to_guess();
            t
        })
        .find(|t| t.gc.state().secret_slot == Some(2))
        .expect("no seed put the ball in slot 2");
    let insts = t.guess(2);
    assert!(insts.contains(&Instruction::Status(Status::Correct)));
    assert_eq!(t.view.status(), Status::Correct);
    assert_eq!(t.gc.state().score, 1);
}

#[test]
fn a_full_game() {
    let mut t = Table::new(3, Difficulty::Easy, 2024);
    assert_eq!(t.view.status(), Status::Welcome);

    let insts = t.play_to_guess();
    let swaps = insts
        .iter()
        .filter(|i| matches!(i, Instruction::Swap { .. }))
        .count();
    assert_eq!(swaps, 5);
    assert_eq!(t.view.status(), Status::ClickACup);
    assert!(t.view.start_enabled());
    assert_eq!(t.view.ball(), None);

    let secret = t.gc.state().secret_slot.unwrap();
    t.guess(secret);
    assert_eq!(t.view.status(), Status::Correct);
    assert_eq!(t.view.score(), 1);
    assert_eq!(t.view.ball(), Some(secret));

    assert_eq!(t.fire_next(), Some(WakeupKind::Reset));
    t.flush();
    assert_eq!(t.view.status(), Status::ReplayPrompt);
    assert_eq!(t.view.ball(), None);
    assert_eq!(t.gc.phase(), Phase::Idle);
    assert!(t.timers.is_empty());
}

#[test]
fn view_cups_agree_with_controller() {
    let mut rng = SmallRng::seed_from_u64(5);
    for seed in 0..50 {
        let cups = rng.gen_range(2..=9);
        let difficulty = Difficulty::ALL[rng.gen_range(0..3)];
        let mut t = Table::new(cups, difficulty, seed);
        for _ in 0..5 {
            t.gc.start_game(&mut t.timers, &mut t.replies);
            let ball = t.view.cups().cup_at(t.gc.state().secret_slot.unwrap());
            t.flush();
            while t.gc.phase() != Phase::AwaitingGuess {
                t.fire_next().unwrap();
                t.flush();
            }
            assert_eq!(t.view.cups().slot_of(ball), t.gc.state().secret_slot);
            t.guess(rng.gen_range(0..cups));
            t.fire_next().unwrap();
            t.flush();
        }
    }
}

#[test]
fn wrong_guess_then_replay() {
    let mut t = Table::new(4, Difficulty::Medium, 77);
    t.play_to_guess();
    let secret = t.gc.state().secret_slot.unwrap();
    t.guess((secret + 1) % 4);
    assert_eq!(t.view.status(), Status::Wrong);
    assert_eq!(t.view.score(), 0);

    // playing again before the reset fires is fine; the old reset just goes nowhere
    let insts = t.play_to_guess();
    assert_eq!(
        insts
            .iter()
            .filter(|i| matches!(i, Instruction::Swap { .. }))
            .count(),
        10
    );
    assert_eq!(t.view.status(), Status::ClickACup);
    assert!(t.gc.state().is_playing);
}

#[test]
fn selection_before_start_is_ignored() {
    let mut t = Table::new(3, Difficulty::Easy, 1);
    for slot in 0..5 {
        assert!(t.guess(slot).is_empty());
    }
    assert_eq!(t.gc.state().score, 0);
    assert!(!t.gc.state().is_playing);
    assert!(t.timers.is_empty());
}

#[test]
fn difficulty_applies_to_next_game_only() {
    let mut t = Table::new(3, Difficulty::Easy, 9);
    t.gc.start_game(&mut t.timers, &mut t.replies);
    t.gc.set_difficulty(Difficulty::Hard, &mut t.replies);
    t.flush();
    assert_eq!(t.view.difficulty(), Difficulty::Hard);

    let mut swaps = 0;
    while t.gc.phase() != Phase::AwaitingGuess {
        t.fire_next().unwrap();
        swaps += t
            .flush()
            .iter()
            .filter(|i| matches!(i, Instruction::Swap { duration, .. } if duration.as_millis() == 500))
            .count();
    }
    assert_eq!(swaps, 5);

    t.guess(0);
    t.fire_next();
    let insts = t.play_to_guess();
    let hard: Vec<_> = insts
        .iter()
        .filter_map(|i| match i {
            Instruction::Swap { duration, .. } => Some(*duration),
            _ => None,
        })
        .collect();
    assert_eq!(hard, vec![Duration::from_millis(200); 15]);
}

#[test]
fn win_rate_is_about_chance() {
    let mut t = Table::new(3, Difficulty::Hard, 31337);
    let mut guesser = SmallRng::seed_from_u64(4);
    let games = 3000;
    for _ in 0..games {
        t.play_to_guess();
        t.guess(guesser.gen_range(0..3));
        t.fire_next();
        t.flush();
    }
    let rate = t.gc.state().score as f64 / games as f64;
    assert!((0.28..0.39).contains(&rate), "win rate {rate}");
}
