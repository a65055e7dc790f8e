#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    SinglePlayer,
    Multiplayer,
}

impl GameMode {
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::Menu => "Pong - Main Menu",
            GameMode::SinglePlayer => "Pong - Vs AI",
            GameMode::Multiplayer => "Pong - Multiplayer",
        }
    }

    pub fn in_match(&self) -> bool {
        !matches!(self, GameMode::Menu)
    }

    /// Routes a discrete command. `selected` is the menu cursor, moved in place
    /// by navigation while in the menu.
    pub fn on_command(self, command: Command, selected: &mut MenuOption) -> Transition {
        match self {
            GameMode::Menu => match command {
                Command::NavigateUp => {
                    *selected = selected.prev();
                    Transition::stay(self)
                }
                Command::NavigateDown => {
                    *selected = selected.next();
                    Transition::stay(self)
                }
                Command::Confirm => match selected {
                    MenuOption::Multiplayer => Transition {
                        mode: GameMode::Multiplayer,
                        effect: Effect::StartMatch { vs_ai: false },
                    },
                    MenuOption::VersusAi => Transition {
                        mode: GameMode::SinglePlayer,
                        effect: Effect::StartMatch { vs_ai: true },
                    },
                },
                Command::Cancel | Command::Quit => Transition {
                    mode: self,
                    effect: Effect::Quit,
                },
                _ => Transition::stay(self),
            },
            GameMode::SinglePlayer | GameMode::Multiplayer => match command {
                Command::Cancel => Transition {
                    mode: GameMode::Menu,
                    effect: Effect::ReturnToMenu,
                },
                Command::Quit => Transition {
                    mode: self,
                    effect: Effect::Quit,
                },
                Command::ToggleMusic => Transition {
                    mode: self,
                    effect: Effect::ToggleMusic,
                },
                Command::VolumeUp => Transition {
                    mode: self,
                    effect: Effect::VolumeUp,
                },
                Command::VolumeDown => Transition {
                    mode: self,
                    effect: Effect::VolumeDown,
                },
                _ => Transition::stay(self),
            },
        }
    }
}

/// The two rows of the main menu, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOption {
    Multiplayer,
    VersusAi,
}

impl MenuOption {
    pub fn all() -> &'static [MenuOption] {
        &[MenuOption::Multiplayer, MenuOption::VersusAi]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Multiplayer => "MULTIPLAYER",
            MenuOption::VersusAi => "PLAY VS AI",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            MenuOption::Multiplayer => 0,
            MenuOption::VersusAi => 1,
        }
    }

    fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Discrete, edge-triggered inputs. Paddle movement is level-triggered and
/// read from held keys instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NavigateUp,
    NavigateDown,
    Confirm,
    Cancel,
    Quit,
    ToggleMusic,
    VolumeUp,
    VolumeDown,
}

impl Command {
    /// Whether holding the key keeps applying the command.
    pub fn repeats(self) -> bool {
        matches!(self, Command::VolumeUp | Command::VolumeDown)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    StartMatch { vs_ai: bool },
    ReturnToMenu,
    Quit,
    ToggleMusic,
    VolumeUp,
    VolumeDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub mode: GameMode,
    pub effect: Effect,
}

impl Transition {
    fn stay(mode: GameMode) -> Self {
        Self {
            mode,
            effect: Effect::None,
        }
    }
}
