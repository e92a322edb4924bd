//! What the player sees, and what their keypresses and clicks mean.

use std::mem;

use crate::{
    cups::{Animator, CupRow},
    game::{Difficulty, Slot},
    io::{
        fmt::{FormattedExt, Text},
        Action, Key, MouseButton, Screen, XY,
    },
    message::{Instruction, Status},
    text,
};

/// How the view responded to an [`Instruction`] or [`Action`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Response {
    /// Nothing in particular needs to be done.
    Nothing,
    /// The visual state has updated, and the [`Screen`] needs to be redrawn.
    Redraw,
    /// The game should be exited.
    Quit,
}

/// Something the player asked for, translated out of raw input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    Start,
    Select(Slot),
    Difficulty(Difficulty),
    Quit,
}

const CUP_WIDTH: usize = 7;
const CUP_GAP: usize = 3;
const STRIDE: usize = CUP_WIDTH + CUP_GAP;

const TITLE_ROW: usize = 0;
const DIFFICULTY_ROW: usize = 2;
/// Where the top of a cup sits when it's down. Lifted cups are two rows higher.
const CUP_ROW: usize = 6;
const LIFT: usize = 2;
/// The table, i.e. the bottom row of a cup that's down.
const BALL_ROW: usize = CUP_ROW + 2;
const LABEL_ROW: usize = CUP_ROW + 4;
const STATUS_ROW: usize = LABEL_ROW + 2;
const START_ROW: usize = STATUS_ROW + 2;
const HELP_ROW: usize = START_ROW + 2;

const CUP_ART: [&str; 3] = [" _____ ", " |   | ", "/_____\\"];
const START_LABEL: &str = "[ S: Start ]";

/// The terminal rendering of a shell game.
///
/// Keeps its own copy of everything it shows, updated only from [`Instruction`]s, so it never needs to look at the
/// controller.
pub struct ShellView {
    cups: CupRow,
    ball: Option<Slot>,
    revealed: bool,
    status: Status,
    score: u32,
    difficulty: Difficulty,
    start_enabled: bool,
    size: XY,
}

impl ShellView {
    pub fn new(cups: usize, difficulty: Difficulty) -> Self {
        Self {
            cups: CupRow::new(cups),
            ball: None,
            revealed: false,
            status: Status::Welcome,
            score: 0,
            difficulty,
            start_enabled: true,
            size: XY(80, 24),
        }
    }

    pub fn cups(&self) -> &CupRow {
        &self.cups
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn ball(&self) -> Option<Slot> {
        self.ball
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    /// Whether the view will look different soon even without any new instructions.
    pub fn is_animating(&self) -> bool {
        self.cups.is_animating()
    }

    /// Apply an instruction from the controller.
    pub fn message(&mut self, inst: &Instruction) -> Response {
        fn set<T: PartialEq>(field: &mut T, val: T) -> bool {
            mem::replace(field, val) != *field
        }
        let changed = match *inst {
            Instruction::ShowBall(slot) => set(&mut self.ball, Some(slot)),
            Instruction::HideBall => set(&mut self.ball, None),
            Instruction::RevealAll => set(&mut self.revealed, true),
            Instruction::Unreveal => set(&mut self.revealed, false),
            Instruction::Status(status) => set(&mut self.status, status),
            Instruction::Score(score) => set(&mut self.score, score),
            Instruction::StartEnabled(enabled) => set(&mut self.start_enabled, enabled),
            Instruction::Difficulty(difficulty) => set(&mut self.difficulty, difficulty),
            Instruction::Swap { a, b, duration } => {
                self.cups.swap(a, b, duration);
                true
            }
        };
        if changed {
            Response::Redraw
        } else {
            Response::Nothing
        }
    }

    fn cups_left(&self) -> usize {
        let total = self.cups.len() * STRIDE - CUP_GAP;
        self.size.x().saturating_sub(total) / 2
    }

    fn start_left(&self) -> usize {
        self.size.x().saturating_sub(START_LABEL.len()) / 2
    }

    fn difficulty_labels(&self) -> Vec<(Difficulty, String)> {
        Difficulty::ALL
            .iter()
            .map(|&d| {
                let name = d.name();
                (d, format!("[{}]{}", &name[..1], &name[1..]))
            })
            .collect()
    }

    /// Where each difficulty label starts, and how wide it is.
    fn difficulty_layout(&self) -> Vec<(Difficulty, usize, String)> {
        let labels = self.difficulty_labels();
        let width = labels.iter().map(|(_, l)| l.len() + 2).sum::<usize>() - 2;
        let mut x = self.size.x().saturating_sub(width) / 2;
        let mut res = vec![];
        for (d, label) in labels {
            let len = label.len();
            res.push((d, x, label));
            x += len + 2;
        }
        res
    }

    fn hit_test(&self, pos: XY) -> Option<Command> {
        let left = self.cups_left();
        for slot in 0..self.cups.len() {
            let corner = XY(left + slot * STRIDE, CUP_ROW - LIFT);
            if pos.within(corner, XY(CUP_WIDTH, LABEL_ROW - corner.y() + 1)) {
                return Some(Command::Select(slot));
            }
        }
        for (d, x, label) in self.difficulty_layout() {
            if pos.within(XY(x, DIFFICULTY_ROW), XY(label.len(), 1)) {
                return Some(Command::Difficulty(d));
            }
        }
        let start = XY(self.start_left(), START_ROW);
        if self.start_enabled && pos.within(start, XY(START_LABEL.len(), 1)) {
            return Some(Command::Start);
        }
        None
    }

    /// Translate raw input into a [`Command`], if it means anything.
    pub fn input(&self, action: Action) -> Option<Command> {
        match action {
            Action::KeyPress { key: Key::Escape } => Some(Command::Quit),
            Action::KeyPress { key: Key::Enter } if self.start_enabled => Some(Command::Start),
            Action::KeyPress { key: Key::Char(c) } => match c.to_ascii_lowercase() {
                'q' => Some(Command::Quit),
                's' | ' ' if self.start_enabled => Some(Command::Start),
                'e' => Some(Command::Difficulty(Difficulty::Easy)),
                'm' => Some(Command::Difficulty(Difficulty::Medium)),
                'h' => Some(Command::Difficulty(Difficulty::Hard)),
                d @ '1'..='9' => {
                    let slot = d as usize - '1' as usize;
                    (slot < self.cups.len()).then_some(Command::Select(slot))
                }
                _ => None,
            },
            Action::MousePress {
                pos,
                button: MouseButton::Left,
            } => self.hit_test(pos),
            _ => None,
        }
    }

    /// Draw the whole game onto `screen`. Also remembers the screen's size for hit-testing clicks.
    pub fn render(&mut self, screen: &mut Screen) {
        self.size = screen.size();
        let width = self.size.x();
        let centered = |len: usize| width.saturating_sub(len) / 2;

        let title = "SHELL GAME";
        screen.write(
            XY(centered(title.len()), TITLE_ROW),
            text![bold bright_white "{}"(title)],
        );
        let score = format!("Score: {}", self.score);
        screen.write(
            XY(width.saturating_sub(score.len() + 1), TITLE_ROW),
            text![bright_yellow "{}"(score)],
        );

        for (d, x, label) in self.difficulty_layout() {
            let text = if d == self.difficulty {
                Text::of(label).bold().underline().cyan()
            } else {
                Text::of(label).bright_black()
            };
            screen.write(XY(x, DIFFICULTY_ROW), vec![text]);
        }

        let left = self.cups_left();
        for slot in 0..self.cups.len() {
            let x = left + (self.cups.position(slot) * STRIDE as f32).round() as usize;
            let lifted = self.revealed || self.ball == Some(slot);
            let top = XY(x, if lifted { CUP_ROW - LIFT } else { CUP_ROW });
            for (i, line) in CUP_ART.iter().enumerate() {
                screen.write(top + (0, i), text![red "{}"(line)]);
            }
            if self.ball == Some(slot) {
                let ball = XY(x, BALL_ROW) + (CUP_WIDTH / 2, 0);
                screen.write(ball, text![bold bright_yellow "o"]);
            }
            let label_x = left + slot * STRIDE + CUP_WIDTH / 2 - 1;
            screen.write(XY(label_x, LABEL_ROW), text![bright_black "[{}]"(slot + 1)]);
        }

        let status = self.status.text();
        let status_text = match self.status {
            Status::Correct => Text::of(status.into()).bold().green(),
            Status::Wrong => Text::of(status.into()).bold().red(),
            _ => Text::plain(status),
        };
        screen.write(XY(centered(status.len()), STATUS_ROW), vec![status_text]);

        let start = if self.start_enabled {
            Text::plain(START_LABEL).bold().bright_white()
        } else {
            Text::plain(START_LABEL).bright_black()
        };
        screen.write(XY(self.start_left(), START_ROW), vec![start]);

        let help = format!(
            "s: start   1-{}: pick a cup   e/m/h: difficulty   q: quit",
            self.cups.len()
        );
        screen.write(XY(centered(help.len()), HELP_ROW), text![bright_black "{}"(help)]);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    fn press(c: char) -> Action {
        Action::KeyPress { key: Key::Char(c) }
    }

    fn click(pos: XY) -> Action {
        Action::MousePress {
            pos,
            button: MouseButton::Left,
        }
    }

    fn rendered(view: &mut ShellView) -> Screen {
        let mut screen = Screen::new(XY(80, 24));
        view.render(&mut screen);
        screen
    }

    #[test]
    fn keys_map_to_commands() {
        let view = ShellView::new(3, Difficulty::Easy);
        assert_eq!(view.input(press('s')), Some(Command::Start));
        assert_eq!(view.input(press(' ')), Some(Command::Start));
        assert_eq!(
            view.input(Action::KeyPress { key: Key::Enter }),
            Some(Command::Start)
        );
        assert_eq!(view.input(press('2')), Some(Command::Select(1)));
        assert_eq!(view.input(press('4')), None);
        assert_eq!(view.input(press('0')), None);
        assert_eq!(
            view.input(press('H')),
            Some(Command::Difficulty(Difficulty::Hard))
        );
        assert_eq!(view.input(press('q')), Some(Command::Quit));
        assert_eq!(
            view.input(Action::KeyPress { key: Key::Escape }),
            Some(Command::Quit)
        );
        assert_eq!(view.input(Action::KeyRelease { key: Key::Char('s') }), None);
    }

    #[test]
    fn disabled_start_does_nothing() {
        let mut view = ShellView::new(3, Difficulty::Easy);
        view.message(&Instruction::StartEnabled(false));
        assert_eq!(view.input(press('s')), None);
        assert_eq!(view.input(Action::KeyPress { key: Key::Enter }), None);
        // picking and quitting still work
        assert_eq!(view.input(press('1')), Some(Command::Select(0)));
        assert_eq!(view.input(press('q')), Some(Command::Quit));
    }

    #[test]
    fn instructions_update_state() {
        let mut view = ShellView::new(3, Difficulty::Easy);
        for inst in [
            Instruction::ShowBall(2),
            Instruction::Score(4),
            Instruction::Status(Status::Shuffling),
            Instruction::Difficulty(Difficulty::Medium),
        ] {
            assert_eq!(view.message(&inst), Response::Redraw);
        }
        assert_eq!(view.message(&Instruction::Score(4)), Response::Nothing);
        assert_eq!(view.ball(), Some(2));
        assert_eq!(view.score(), 4);
        assert_eq!(view.status(), Status::Shuffling);
        assert_eq!(view.difficulty(), Difficulty::Medium);
        view.message(&Instruction::HideBall);
        assert_eq!(view.ball(), None);
    }

    #[test]
    fn swaps_reach_the_cups() {
        let mut view = ShellView::new(3, Difficulty::Easy);
        view.message(&Instruction::Swap {
            a: 0,
            b: 1,
            duration: Duration::ZERO,
        });
        assert_eq!(view.cups().order(), &[1, 0, 2]);
    }

    #[test]
    fn render_shows_status_and_score() {
        let mut view = ShellView::new(3, Difficulty::Easy);
        view.message(&Instruction::Status(Status::Correct));
        view.message(&Instruction::Score(7));
        let screen = rendered(&mut view);
        assert!(screen.row_text(TITLE_ROW).contains("Score: 7"));
        assert!(screen.row_text(STATUS_ROW).contains("Correct! You found it!"));
        assert!(screen.row_text(LABEL_ROW).contains("[1]"));
        assert!(screen.row_text(LABEL_ROW).contains("[3]"));
    }

    #[test]
    fn ball_drawn_under_lifted_cup() {
        let mut view = ShellView::new(3, Difficulty::Easy);
        view.message(&Instruction::ShowBall(1));
        let screen = rendered(&mut view);
        let center = view.cups_left() + STRIDE + CUP_WIDTH / 2;
        assert_eq!(screen[BALL_ROW][center].ch, 'o');
        // the other cups are still down
        assert_eq!(screen[CUP_ROW][view.cups_left() + 1].ch, '_');
        view.message(&Instruction::HideBall);
        let screen = rendered(&mut view);
        assert_eq!(screen[BALL_ROW][center].ch, '_');
    }

    #[test]
    fn clicks_hit_cups_and_buttons() {
        let mut view = ShellView::new(3, Difficulty::Easy);
        rendered(&mut view);
        let left = view.cups_left();
        assert_eq!(
            view.input(click(XY(left + 1, CUP_ROW + 1))),
            Some(Command::Select(0))
        );
        assert_eq!(
            view.input(click(XY(left + 2 * STRIDE + 3, LABEL_ROW))),
            Some(Command::Select(2))
        );
        // the gap between cups
        assert_eq!(view.input(click(XY(left + CUP_WIDTH + 1, CUP_ROW + 1))), None);
        assert_eq!(
            view.input(click(XY(view.start_left() + 1, START_ROW))),
            Some(Command::Start)
        );
        let (d, x, _) = view.difficulty_layout().pop().unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert_eq!(
            view.input(click(XY(x, DIFFICULTY_ROW))),
            Some(Command::Difficulty(Difficulty::Hard))
        );
        assert_eq!(view.input(click(XY(0, 23))), None);
    }
}
