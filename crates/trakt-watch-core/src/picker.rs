use crate::error::ResolveError;
use crate::prompter::Prompter;

/// Where a pick currently stands. `Cancelled` and `Resolved` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Rendering,
    AwaitingInput,
    Cancelled,
    Resolved(usize),
}

/// Choice loop over a non-empty list, driven one input line at a time.
///
/// Holds no items, only their count, so the transitions can be exercised
/// without a terminal.
#[derive(Debug, Clone)]
pub struct Picker {
    len: usize,
    show_details: bool,
    state: PickerState,
}

impl Picker {
    pub fn new(len: usize, show_details: bool) -> Result<Self, ResolveError> {
        if len == 0 {
            return Err(ResolveError::NoResults);
        }
        Ok(Self {
            len,
            show_details,
            state: PickerState::Rendering,
        })
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn rendered(&mut self) {
        if self.state == PickerState::Rendering {
            self.state = PickerState::AwaitingInput;
        }
    }

    /// Apply one line of input. Returns a message when the input was rejected;
    /// the picker then goes back to rendering.
    pub fn accept(&mut self, line: &str) -> Option<String> {
        if self.state != PickerState::AwaitingInput {
            return None;
        }
        let input = match line.trim() {
            "" => "1",
            other => other,
        };
        match input {
            "n" | "q" => {
                self.state = PickerState::Cancelled;
                None
            }
            "u" => {
                self.show_details = !self.show_details;
                self.state = PickerState::Rendering;
                None
            }
            _ => {
                self.state = PickerState::Rendering;
                match input.parse::<usize>() {
                    Ok(choice) if (1..=self.len).contains(&choice) => {
                        self.state = PickerState::Resolved(choice - 1);
                        None
                    }
                    Ok(_) => Some(format!("Invalid choice, must be 1-{}", self.len)),
                    Err(_) => Some(format!("Could not parse '{}' into a number", input)),
                }
            }
        }
    }
}

/// The chosen item, plus the detail mode it was chosen in
#[derive(Debug)]
pub struct Pick<'a, T> {
    pub index: usize,
    pub item: &'a T,
    pub show_details: bool,
}

/// Render `items`, read a choice, repeat until one is picked or the user quits.
///
/// `n`/`q` abort the whole operation with `UserCancelled`, `u` toggles detail
/// mode, a blank line picks the first item.
pub fn pick<'a, T, P, R>(
    items: &'a [T],
    mut render: R,
    prompt_label: &str,
    initial_show_details: bool,
    prompter: &mut P,
) -> Result<Pick<'a, T>, ResolveError>
where
    P: Prompter + ?Sized,
    R: FnMut(bool, &[T], &mut P),
{
    let mut picker = Picker::new(items.len(), initial_show_details)?;
    loop {
        match picker.state() {
            PickerState::Rendering => {
                render(picker.show_details(), items, &mut *prompter);
                picker.rendered();
            }
            PickerState::AwaitingInput => {
                let line = prompter.read_line(prompt_label, Some("1"))?;
                if let Some(message) = picker.accept(&line) {
                    prompter.report_error(&message);
                }
            }
            PickerState::Cancelled => return Err(ResolveError::UserCancelled),
            PickerState::Resolved(index) => {
                let item = items.get(index).ok_or(ResolveError::NoResults)?;
                return Ok(Pick {
                    index,
                    item,
                    show_details: picker.show_details(),
                });
            }
        }
    }
}
