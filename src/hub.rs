use strum::{EnumIter, IntoEnumIterator};


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter)]
pub enum GameId {
    Chess,
    Clobber,
    TicTacToe,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameEntry {
    pub id: GameId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: char,
}

impl GameId {
    // Server-backed games need a game id before the board can be shown.
    pub fn is_networked(self) -> bool {
        match self {
            GameId::Chess | GameId::Clobber => true,
            GameId::TicTacToe => false,
        }
    }

    pub fn entry(self) -> GameEntry {
        match self {
            GameId::Chess => GameEntry {
                id: self,
                title: "Chess",
                description: "Classic chess on an 8x8 board: checkmate the opponent's king.",
                icon: '♟',
            },
            GameId::Clobber => GameEntry {
                id: self,
                title: "Clobber",
                description: "Strategy game on a 6x6 board: capture an adjacent opponent stone \
                    by moving onto its square. Whoever cannot move loses.",
                icon: '●',
            },
            GameId::TicTacToe => GameEntry {
                id: self,
                title: "Tic-tac-toe 5x5",
                description: "Extended tic-tac-toe: the first player to line up 5 marks wins.",
                icon: '✕',
            },
        }
    }
}

pub fn catalog() -> Vec<GameEntry> { GameId::iter().map(GameId::entry).collect() }

// Game list with a cursor. At most one game is mounted at a time.
#[derive(Clone, Debug)]
pub struct Hub {
    entries: Vec<GameEntry>,
    cursor: usize,
    mounted: Option<GameId>,
}

impl Hub {
    pub fn new() -> Self {
        Hub { entries: catalog(), cursor: 0, mounted: None }
    }

    pub fn entries(&self) -> &[GameEntry] { &self.entries }
    pub fn cursor(&self) -> usize { self.cursor }
    pub fn mounted(&self) -> Option<GameId> { self.mounted }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.entries.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn mount_at_cursor(&mut self) -> GameId {
        let id = self.entries[self.cursor].id;
        self.mount(id);
        id
    }

    pub fn mount(&mut self, id: GameId) {
        if let Some(pos) = self.entries.iter().position(|e| e.id == id) {
            self.cursor = pos;
        }
        self.mounted = Some(id);
    }

    pub fn unmount(&mut self) { self.mounted = None; }
}
