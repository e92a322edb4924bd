//! Implements the (crossterm-based) rendering to CLI.

use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, TryRecvError},
        Arc,
    },
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{self as ct, DisableMouseCapture, EnableMouseCapture},
    execute,
    style::{
        Attribute, Color as CrosstermColor, ResetColor, SetAttribute, SetAttributes,
        SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::io::{
    fmt::{Cell, Color as SgColor, Formatted},
    Action, IoRunner, IoSystem, Key, MouseButton, Screen, XY,
};

fn io4ct_btn(ct: ct::MouseButton) -> MouseButton {
    match ct {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Middle => MouseButton::Middle,
        ct::MouseButton::Right => MouseButton::Right,
    }
}

pub struct CtRunner {
    actions: mpsc::Sender<Action>,
    stop: Arc<AtomicBool>,
}

impl CtRunner {
    fn init_term() -> crate::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            std::io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> crate::Result<()> {
        execute!(
            std::io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn new(actions: mpsc::Sender<Action>, stop: Arc<AtomicBool>) -> crate::Result<Self> {
        Self::init_term()?;
        std::panic::set_hook(Box::new(|i| {
            let _ = Self::clean_term();
            println!("{}", i);
        }));
        Ok(Self { actions, stop })
    }
}

impl Drop for CtRunner {
    fn drop(&mut self) {
        let _ = Self::clean_term();
    }
}

impl IoRunner for CtRunner {
    fn step(&mut self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }

        macro_rules! try_send {
            ( $type:ident $( ($nt:expr) )? $( { $($br:tt)* } )? ) => {
                match self.actions.send(Action::$type $(($nt))? $({$($br)*})? ) {
                    Ok(_) => (),
                    Err(_) => return true,
                }
            }
        }
        macro_rules! mods {
            ( $mods:ident, $action:ident ) => {
                if $mods.contains(ct::KeyModifiers::SHIFT) {
                    try_send!($action {
                        key: Key::LeftShift
                    });
                }
                if $mods.contains(ct::KeyModifiers::CONTROL) {
                    try_send!($action { key: Key::LeftCtrl });
                }
                if $mods.contains(ct::KeyModifiers::ALT) {
                    try_send!($action { key: Key::LeftAlt });
                }
            };
        }
        // zero timeout to avoid blocking in `step`
        match ct::poll(Duration::ZERO) {
            Ok(false) => return false,
            Ok(true) => (),
            Err(e) => {
                try_send!(Error(format!("polling: {}", e)));
                return true;
            }
        }
        let ev = match ct::read() {
            Ok(ev) => ev,
            Err(e) => {
                try_send!(Error(format!("reading: {}", e)));
                return true;
            }
        };
        match ev {
            // some platforms report releases (and repeats) as their own events; we synthesize our own releases
            ct::Event::Key(ct::KeyEvent { kind, .. }) if kind != ct::KeyEventKind::Press => (),
            ct::Event::Key(ct::KeyEvent {
                code, modifiers, ..
            }) => {
                mods!(modifiers, KeyPress);
                let action_code = match code {
                    ct::KeyCode::Char(c) => Some(Key::Char(c)),
                    ct::KeyCode::F(c) => Some(Key::F(c as usize)),
                    ct::KeyCode::Backspace => Some(Key::Backspace),
                    ct::KeyCode::Enter => Some(Key::Enter),
                    ct::KeyCode::Left => Some(Key::Left),
                    ct::KeyCode::Right => Some(Key::Right),
                    ct::KeyCode::Up => Some(Key::Up),
                    ct::KeyCode::Down => Some(Key::Down),
                    ct::KeyCode::Home => Some(Key::Home),
                    ct::KeyCode::End => Some(Key::End),
                    ct::KeyCode::PageUp => Some(Key::PageUp),
                    ct::KeyCode::PageDown => Some(Key::PageDown),
                    ct::KeyCode::Tab => Some(Key::Tab),
                    ct::KeyCode::Delete => Some(Key::Delete),
                    ct::KeyCode::Insert => Some(Key::Insert),
                    ct::KeyCode::Esc => Some(Key::Escape),
                    _ => None,
                };
                match action_code {
                    Some(key) => {
                        try_send!(KeyPress { key });
                        try_send!(KeyRelease { key });
                    }
                    None => try_send!(Unknown(format!("key {:?}", code))),
                }
                mods!(modifiers, KeyRelease);
            }
            ct::Event::Resize(..) => try_send!(Redraw),
            ct::Event::Mouse(ct::MouseEvent {
                row,
                column: col,
                kind,
                ..
            }) => {
                let pos = XY(col as usize, row as usize);
                match kind {
                    ct::MouseEventKind::Up(btn) => try_send!(MouseRelease {
                        pos,
                        button: io4ct_btn(btn)
                    }),
                    ct::MouseEventKind::Down(btn) => try_send!(MousePress {
                        pos,
                        button: io4ct_btn(btn)
                    }),
                    ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => {
                        try_send!(MouseMove { pos })
                    }
                    ct::MouseEventKind::ScrollUp => try_send!(MousePress {
                        pos,
                        button: MouseButton::ScrollUp
                    }),
                    ct::MouseEventKind::ScrollDown => try_send!(MousePress {
                        pos,
                        button: MouseButton::ScrollDown
                    }),
                }
            }
            ct::Event::FocusGained => try_send!(Redraw),
            ct::Event::FocusLost => (),
            ct::Event::Paste(_) => try_send!(Unknown("paste".into())),
        };

        false
    }
}

/// Crossterm color for our colors
fn ct4sg_color(sg: SgColor) -> CrosstermColor {
    match sg {
        SgColor::BrightBlack => CrosstermColor::DarkGrey,
        SgColor::Black => CrosstermColor::Black,
        SgColor::BrightRed => CrosstermColor::Red,
        SgColor::Red => CrosstermColor::DarkRed,
        SgColor::BrightGreen => CrosstermColor::Green,
        SgColor::Green => CrosstermColor::DarkGreen,
        SgColor::BrightYellow => CrosstermColor::Yellow,
        SgColor::Yellow => CrosstermColor::DarkYellow,
        SgColor::BrightBlue => CrosstermColor::Blue,
        SgColor::Blue => CrosstermColor::DarkBlue,
        SgColor::BrightMagenta => CrosstermColor::Magenta,
        SgColor::Magenta => CrosstermColor::DarkMagenta,
        SgColor::BrightCyan => CrosstermColor::Cyan,
        SgColor::Cyan => CrosstermColor::DarkCyan,
        SgColor::BrightWhite => CrosstermColor::White,
        SgColor::White => CrosstermColor::Grey,
    }
}

/// Render a single row of cells into a `Vec<u8>` that can be printed
fn render_row(row: &[Cell], out: &mut Vec<u8>) -> crate::Result<()> {
    let Some(first) = row.first() else {
        return Ok(());
    };
    let mut ch_b = [0u8; 4];

    let mut fg = first.get_fmt().fg;
    let mut bg = first.get_fmt().bg;
    let mut bold = first.get_fmt().bold;
    let mut underline = first.get_fmt().underline;
    let mut attrs = [Attribute::NormalIntensity, Attribute::NoUnderline];
    if bold {
        attrs[0] = Attribute::Bold;
    }
    if underline {
        attrs[1] = Attribute::Underlined;
    }
    crossterm::queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(ct4sg_color(fg)),
        SetBackgroundColor(ct4sg_color(bg)),
        SetAttributes(attrs.as_ref().into()),
    )?;
    out.extend_from_slice(first.ch.encode_utf8(&mut ch_b).as_bytes());

    for cell in &row[1..] {
        let fmt = cell.get_fmt();
        if fmt.fg != fg {
            fg = fmt.fg;
            crossterm::queue!(out, SetForegroundColor(ct4sg_color(fg)))?;
        }
        if fmt.bg != bg {
            bg = fmt.bg;
            crossterm::queue!(out, SetBackgroundColor(ct4sg_color(bg)))?;
        }
        if fmt.bold != bold {
            bold = fmt.bold;
            let attr = if bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            crossterm::queue!(out, SetAttribute(attr))?;
        }
        if fmt.underline != underline {
            underline = fmt.underline;
            let attr = if underline {
                Attribute::Underlined
            } else {
                Attribute::NoUnderline
            };
            crossterm::queue!(out, SetAttribute(attr))?;
        }
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    crossterm::queue!(out, MoveDown(1), MoveToColumn(0))?;
    Ok(())
}

pub struct CtSystem {
    queue: mpsc::Receiver<Action>,
    stop: Arc<AtomicBool>,
}

impl CtSystem {
    pub fn new() -> crate::Result<(Self, CtRunner)> {
        let (queue_s, queue_r) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let runner = CtRunner::new(queue_s, stop.clone())?;
        Ok((
            Self {
                queue: queue_r,
                stop,
            },
            runner,
        ))
    }
}

impl IoSystem for CtSystem {
    fn size(&self) -> XY {
        let (x, y) = terminal::size().unwrap_or((80, 24));
        XY(x as usize, y as usize)
    }

    fn draw(&mut self, screen: &Screen) -> crate::Result<()> {
        let mut out = vec![];
        crossterm::queue!(&mut out, MoveTo(0, 0), Clear(ClearType::All))?;
        for row in screen.rows() {
            render_row(row, &mut out)?;
        }
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
        Ok(())
    }

    fn poll_input(&mut self) -> crate::Result<Option<Action>> {
        match self.queue.try_recv() {
            Ok(res) => Ok(Some(res)),
            Err(TryRecvError::Disconnected) => Err("input queue closed unexpectedly".into()),
            Err(TryRecvError::Empty) => Ok(None),
        }
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
