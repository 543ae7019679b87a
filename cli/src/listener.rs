use std::io::{BufRead, Write};

use anyhow::Result;
use rand::CryptoRng;
use tripmine_core::{Coord, Coord2, GameConfig, Minefield, Session, StepOutcome};

use crate::command::Command;

/// Prompt/execute loop reading commands line by line and writing feedback.
pub struct Listener<I, O, R> {
    input: I,
    output: O,
    session: Session<R>,
    show_coords: bool,
}

impl<I, O, R> Listener<I, O, R>
where
    I: BufRead,
    O: Write,
    R: CryptoRng,
{
    pub fn new(input: I, output: O, session: Session<R>) -> Self {
        Self {
            input,
            output,
            session,
            show_coords: true,
        }
    }

    /// Whether boards are printed with row and column labels.
    pub fn with_coords(mut self, show_coords: bool) -> Self {
        self.show_coords = show_coords;
        self
    }

    /// Runs until `quit` or end of input.
    pub fn run(mut self) -> Result<()> {
        self.prompt("New Game")?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                log::debug!("input closed");
                break;
            }

            let command = Command::parse(&line);
            log::debug!("command: {:?}", command);
            if command == Command::Quit {
                writeln!(self.output, "Bye bye")?;
                break;
            }
            self.execute(command)?;
        }

        self.output.flush()?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Unknown(message) => return self.prompt(&message),
            Command::Quit => return Ok(()),
            Command::New {
                rows,
                columns,
                mines,
            } => self.new_game(rows, columns, mines)?,
            Command::Step { .. } | Command::Mark { .. } if self.session.minefield().is_none() => {
                return self.prompt("Please start a game first");
            }
            Command::Step { row, column } => {
                if let Some(coords) = self.check_bounds(row, column)? {
                    self.step(coords)?;
                }
            }
            Command::Mark { row, column } => {
                if let Some(coords) = self.check_bounds(row, column)? {
                    self.mark(coords)?;
                }
            }
        }
        self.prompt("")
    }

    fn new_game(&mut self, rows: i64, columns: i64, mines: Option<i64>) -> Result<()> {
        // a tenth of the board unless told otherwise
        let mines = mines.unwrap_or_else(|| (rows.saturating_mul(columns) / 10).max(1));

        match GameConfig::from_signed(rows, columns, mines) {
            Ok(config) => {
                self.session.start(config)?;
                self.print_board(false)
            }
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(())
            }
        }
    }

    fn step(&mut self, coords: Coord2) -> Result<()> {
        match self.session.step(coords)? {
            StepOutcome::HitMine => {
                writeln!(self.output, "You stepped on a mine! GAME OVER")?;
                self.print_board(true)
            }
            StepOutcome::Won => self.print_win(),
            StepOutcome::Revealed | StepOutcome::NoChange => self.print_board(false),
        }
    }

    fn mark(&mut self, coords: Coord2) -> Result<()> {
        self.session.mark_tile(coords)?;
        // marking can only end a game by winning it
        if self.session.state().is_finished() {
            self.print_win()
        } else {
            self.print_board(false)
        }
    }

    /// Reports coordinates outside the board instead of handing them to the engine.
    fn check_bounds(&mut self, row: i64, column: i64) -> Result<Option<Coord2>> {
        let Some(minefield) = self.session.minefield() else {
            return Ok(None);
        };
        let row = Coord::try_from(row).ok().filter(|&row| row < minefield.rows());
        let column = Coord::try_from(column)
            .ok()
            .filter(|&column| column < minefield.columns());

        match (row, column) {
            (Some(row), Some(column)) => return Ok(Some((row, column))),
            (None, None) => writeln!(self.output, "Row and column out of bounds!")?,
            (None, _) => writeln!(self.output, "Row out of bounds!")?,
            (_, None) => writeln!(self.output, "Column out of bounds!")?,
        }
        Ok(None)
    }

    fn print_win(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "You've revealed & marked all mines, and haven't incorrectly marked any tiles."
        )?;
        writeln!(self.output, "Congratulations - you win!")?;
        self.print_board(true)
    }

    /// Prints the active game, or the one that just ended.
    fn print_board(&mut self, force_reveal: bool) -> Result<()> {
        let Some(minefield) = self.session.minefield().or(self.session.last_game()) else {
            return Ok(());
        };
        let board = render(minefield, force_reveal, self.show_coords);
        write!(self.output, "{board}")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        write!(self.output, ">")?;
        self.output.flush()?;
        Ok(())
    }
}

fn render(minefield: &Minefield, force_reveal: bool, show_coords: bool) -> String {
    if show_coords {
        minefield.render_with_coords(force_reveal)
    } else {
        minefield.render(force_reveal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run(script: &str, show_coords: bool) -> String {
        let mut output = Vec::new();
        let session = Session::new(StdRng::seed_from_u64(77));
        Listener::new(script.as_bytes(), &mut output, session)
            .with_coords(show_coords)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn moves_before_new_game_are_refused() {
        let output = run("step 1 1\nmark 0 0\nquit\n", false);

        assert_eq!(
            output,
            "New Game\n>Please start a game first\n>Please start a game first\n>Bye bye\n"
        );
    }

    #[test]
    fn unknown_input_gets_feedback() {
        let output = run("dance\n\nstep x y\nq\n", false);

        assert_eq!(
            output,
            concat!(
                "New Game\n",
                ">Unknown command: dance\n",
                ">Please tell me what to do\n",
                ">step needs two integer arguments\n",
                ">Bye bye\n",
            )
        );
    }

    #[test]
    fn mine_free_board_is_won_on_first_step() {
        let output = run("new 2 3 0\nstep 1 1\nstep 0 0\n", false);

        assert_eq!(
            output,
            concat!(
                "New Game\n",
                ">###\n###\n",
                "\n>You've revealed & marked all mines, and haven't incorrectly marked any tiles.\n",
                "Congratulations - you win!\n",
                "   \n   \n",
                "\n>Please start a game first\n",
                ">",
            )
        );
    }

    #[test]
    fn stepping_on_a_mine_ends_the_game() {
        let output = run("new 2 2 3\nstep 0 0\nstep 1 1\n", true);

        assert_eq!(
            output,
            concat!(
                "New Game\n",
                ">  0 1\n0 # #\n1 # #\n",
                "\n>  0 1\n0 3 #\n1 # #\n",
                "\n>You stepped on a mine! GAME OVER\n",
                "  0 1\n0 3 *\n1 * *\n",
                "\n>",
            )
        );
    }

    #[test]
    fn out_of_bounds_coordinates_are_reported() {
        let output = run("new 3 4 1\nstep 3 0\nmark 0 4\nstep -1 9\n", false);

        assert!(output.contains(">Row out of bounds!\n"));
        assert!(output.contains(">Column out of bounds!\n"));
        assert!(output.contains(">Row and column out of bounds!\n"));
    }

    #[test]
    fn invalid_new_game_is_explained() {
        let output = run("new 1 1\nnew 3 3 9\nnew -2 3\nstep 0 0\n", false);

        assert!(output.contains("Invalid configuration: must be more than 1 tile\n"));
        assert!(output.contains(
            "Invalid configuration: more mines than tiles available (excluding (0,0))\n"
        ));
        assert!(output.contains("Invalid configuration: must have 1 or more rows\n"));
        assert!(output.ends_with(">Please start a game first\n>"));
    }

    fn listener(script: &str) -> Listener<&[u8], Vec<u8>, StdRng> {
        Listener::new(script.as_bytes(), Vec::new(), Session::new(StdRng::seed_from_u64(77)))
    }

    #[test]
    fn new_without_count_mines_a_tenth_of_the_board() {
        let mut listener = listener("");

        listener.new_game(4, 5, None).unwrap();
        assert_eq!(listener.session.minefield().unwrap().mines_placed(), 2);

        listener.new_game(10, 15, None).unwrap();
        assert_eq!(listener.session.minefield().unwrap().mines_placed(), 15);
    }

    #[test]
    fn new_without_count_places_at_least_one_mine() {
        let mut listener = listener("");

        listener.new_game(3, 3, None).unwrap();
        assert_eq!(listener.session.minefield().unwrap().mines_placed(), 1);

        listener.new_game(1, 2, None).unwrap();
        assert_eq!(listener.session.minefield().unwrap().mines_placed(), 1);
    }

    #[test]
    fn explicit_count_overrides_default() {
        let mut listener = listener("");

        listener.new_game(4, 5, Some(7)).unwrap();
        assert_eq!(listener.session.minefield().unwrap().mines_placed(), 7);
    }

    #[test]
    fn new_with_default_count_prints_the_board() {
        let output = run("new 3 3\nstep 0 0\nquit\n", false);

        assert!(output.starts_with("New Game\n>###\n###\n###\n"));
        assert!(output.ends_with(">Bye bye\n"));
    }

    #[test]
    fn oversized_board_is_refused() {
        let output = run("new 60000 60000\nstep 0 0\n", false);

        assert!(output.contains("Invalid configuration: grid dimensions too large\n"));
        assert!(output.ends_with(">Please start a game first\n>"));
    }

    #[test]
    fn marking_toggles_and_wins() {
        let output = run("new 2 2 3\nmark 0 1\nmark 1 0\nmark 1 0\nmark 1 0\nmark 1 1\n", false);

        assert!(output.contains(">#!\n##\n"));
        assert!(output.contains("Congratulations - you win!\n3!\n!!\n"));
    }
}
