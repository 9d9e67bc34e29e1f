use tictactoe_common::games::tictactoe::CELL_COUNT;

pub const HELP_TEXT: &str = "1-9 place a mark, r restart, j N jump to move N, h help, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Zero-based board index.
    Cell(usize),
    Restart,
    Jump(usize),
    Help,
    Quit,
}

/// Cells are typed 1-9, left to right and top to bottom.
pub fn parse_input(line: &str) -> Result<InputCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(HELP_TEXT.to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "r" | "restart" => InputCommand::Restart,
        "q" | "quit" | "exit" => InputCommand::Quit,
        "h" | "help" | "?" => InputCommand::Help,
        "j" | "jump" => {
            let Some(arg) = parts.next() else {
                return Err("jump needs a move number".to_string());
            };
            let move_number = arg
                .parse::<usize>()
                .map_err(|_| format!("not a move number: {}", arg))?;
            InputCommand::Jump(move_number)
        }
        cell => match cell.parse::<usize>() {
            Ok(n) if (1..=CELL_COUNT).contains(&n) => InputCommand::Cell(n - 1),
            Ok(n) => return Err(format!("cell {} is off the board, use 1-{}", n, CELL_COUNT)),
            Err(_) => return Err(format!("unknown command: {}", head)),
        },
    };

    if parts.next().is_some() {
        return Err(format!("too many arguments for {}", head));
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_one_based() {
        assert_eq!(parse_input("1"), Ok(InputCommand::Cell(0)));
        assert_eq!(parse_input(" 9 "), Ok(InputCommand::Cell(8)));
        assert!(parse_input("0").is_err());
        assert!(parse_input("10").is_err());
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input("r"), Ok(InputCommand::Restart));
        assert_eq!(parse_input("Quit"), Ok(InputCommand::Quit));
        assert_eq!(parse_input("j 3"), Ok(InputCommand::Jump(3)));
        assert_eq!(parse_input("jump 0"), Ok(InputCommand::Jump(0)));
        assert_eq!(parse_input("?"), Ok(InputCommand::Help));
    }

    #[test]
    fn test_bad_input() {
        assert!(parse_input("").is_err());
        assert!(parse_input("j").is_err());
        assert!(parse_input("j x").is_err());
        assert!(parse_input("r now").is_err());
        assert!(parse_input("move").is_err());
    }
}
