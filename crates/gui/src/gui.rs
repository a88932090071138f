//! The desktop GUI for the taktyka board game, built with Iced.
//!
//! This file follows the Elm architecture, a Model-View-Update pattern:
//! - `TaktykaApp` is the Model: It holds the entire state of the application.
//! - `Message` is the Update trigger: It defines all possible events that can change the state.
//! - `update` is the Update logic: It processes messages to transition the state.
//! - `view` is the View: It renders the UI based on the current state.

use iced::{
    executor, mouse,
    widget::{
        canvas::{self, event, Frame, Geometry, Path, Program, Stroke},
        text, Button, Column, Container, Row, TextInput,
    },
    Application, Command, Element, Length, Pixels, Point, Rectangle, Renderer, Settings, Size,
    Theme,
};
use std::sync::{Arc, Mutex};

use engine::{
    board::{Square, BOARD_SIZE},
    constants::Color,
    game::{ClickOutcome, Game, Outcome},
    history::Direction,
};

const CELL_SIZE: f32 = 56.0;
// One margin cell on the top and left edges carries the coordinate labels.
const CANVAS_SIZE: f32 = CELL_SIZE * (BOARD_SIZE as f32 + 1.0);

/// Runs the GUI application.
pub fn run() -> iced::Result {
    TaktykaApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(700.0, 860.0),
            ..iced::window::Settings::default()
        },
        ..Settings::default()
    })
}

/// Defines the messages that can be sent to the `update` function.
#[derive(Debug, Clone)]
enum Message {
    NewGame,
    PrevMove,
    NextMove,
    SquareClicked(Square),
    LayoutInputChanged(String),
    LoadLayout,
}

/// The main application state (the "Model").
struct TaktykaApp {
    game: Arc<Mutex<Game>>,
    layout_input: String,
    status: Status,
}

/// Represents the current high-level state of the game.
enum Status {
    Playing,
    GameOver(String),
}

impl Application for TaktykaApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let game = Game::new();
        let app = TaktykaApp {
            layout_input: game.layout(),
            game: Arc::new(Mutex::new(game)),
            status: Status::Playing,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Taktyka")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SquareClicked(square) => self.handle_square_clicked(square),
            Message::NewGame => self.handle_new_game(),
            Message::PrevMove => self.handle_navigate(Direction::Back),
            Message::NextMove => self.handle_navigate(Direction::Forward),
            Message::LayoutInputChanged(new_layout) => {
                self.layout_input = new_layout;
            }
            Message::LoadLayout => self.handle_load_layout(),
        }
        Command::none()
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let (status_text, history_line, can_back, can_forward) = {
            let game = self.game.lock().unwrap();
            let status_text = match &self.status {
                Status::GameOver(message) => message.clone(),
                Status::Playing if game.browsing() => String::from("Browsing history"),
                Status::Playing => format!("{:?} to move", game.turn()),
            };
            (
                status_text,
                game.moves().join("  "),
                game.can_navigate(Direction::Back),
                game.can_navigate(Direction::Forward),
            )
        };

        let board = canvas::Canvas::new(BoardCanvas::new(self.game.clone()))
            .width(Length::Fixed(CANVAS_SIZE))
            .height(Length::Fixed(CANVAS_SIZE));

        let controls = Row::new()
            .spacing(10)
            .push(Button::new(text("New Game")).on_press(Message::NewGame))
            .push(Button::new(text("◀ Prev")).on_press_maybe(can_back.then_some(Message::PrevMove)))
            .push(
                Button::new(text("Next ▶"))
                    .on_press_maybe(can_forward.then_some(Message::NextMove)),
            );

        let layout_controls = Row::new()
            .spacing(10)
            .push(
                TextInput::new("Layout string...", &self.layout_input)
                    .on_input(Message::LayoutInputChanged)
                    .width(Length::Fill),
            )
            .push(Button::new(text("Load Layout")).on_press(Message::LoadLayout));

        let content = Column::new()
            .spacing(20)
            .align_items(iced::Alignment::Center)
            .push(text(status_text).size(Pixels(24.0)))
            .push(board)
            .push(controls)
            .push(text(history_line).size(Pixels(16.0)))
            .push(layout_controls);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}

// --- Update Helper Functions ---

impl TaktykaApp {
    /// Forwards a board click to the engine and surfaces a game-over message
    /// at the moment the terminal transition happens.
    fn handle_square_clicked(&mut self, square: Square) {
        let mut game = self.game.lock().unwrap();
        if let ClickOutcome::Moved(ended) = game.click(square) {
            self.layout_input = game.layout();
            if let Some(outcome) = ended {
                self.status = Status::GameOver(outcome_message(outcome));
            }
        }
    }

    /// Resets the application to the initial state for a new game.
    fn handle_new_game(&mut self) {
        let mut game = self.game.lock().unwrap();
        game.new_game();
        self.layout_input = game.layout();
        self.status = Status::Playing;
    }

    /// Steps through the move history; the shown position follows the cursor.
    fn handle_navigate(&mut self, direction: Direction) {
        let mut game = self.game.lock().unwrap();
        if game.navigate(direction) {
            self.layout_input = game.layout();
        }
    }

    /// Replaces the game with the position described in the input box.
    fn handle_load_layout(&mut self) {
        match Game::from_layout(&self.layout_input) {
            Ok(loaded) => {
                *self.game.lock().unwrap() = loaded;
                self.status = Status::Playing;
            }
            Err(error) => {
                tracing::warn!(error = %error, "layout rejected");
            }
        }
    }
}

// --- Canvas Drawing Logic ---

struct BoardCanvas {
    game: Arc<Mutex<Game>>,
}

impl BoardCanvas {
    fn new(game: Arc<Mutex<Game>>) -> Self {
        Self { game }
    }
}

impl Program<Message> for BoardCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let game = self.game.lock().unwrap();
        let mut frame = Frame::new(renderer, bounds.size());

        let background = Path::rectangle(Point::new(0.0, 0.0), frame.size());
        frame.fill(&background, iced::Color::WHITE);

        draw_labels(&mut frame);
        draw_cells(&game, &mut frame);
        draw_selection(&game, &mut frame);

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: event::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        if let event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                let file = (position.x / CELL_SIZE).floor() as i32 - 1;
                let rank = (position.y / CELL_SIZE).floor() as i32 - 1;
                if (0..BOARD_SIZE as i32).contains(&file) && (0..BOARD_SIZE as i32).contains(&rank)
                {
                    let square = Square::new(file as u8, rank as u8);
                    return (event::Status::Captured, Some(Message::SquareClicked(square)));
                }
            }
        }
        (event::Status::Ignored, None)
    }
}

// --- Canvas Drawing Helper Functions ---

/// File letters across the top margin, rank labels down the left one.
fn draw_labels(frame: &mut Frame) {
    for i in 0..BOARD_SIZE {
        fill_label(
            frame,
            ((b'A' + i as u8) as char).to_string(),
            Point::new((i as f32 + 1.5) * CELL_SIZE, CELL_SIZE * 0.5),
        );
        fill_label(
            frame,
            (BOARD_SIZE - i).to_string(),
            Point::new(CELL_SIZE * 0.5, (i as f32 + 1.5) * CELL_SIZE),
        );
    }
}

fn draw_cells(game: &Game, frame: &mut Frame) {
    for rank in 0..BOARD_SIZE as u8 {
        for file in 0..BOARD_SIZE as u8 {
            let square = Square::new(file, rank);
            let origin = cell_origin(square);
            let cell = Path::rectangle(origin, Size::new(CELL_SIZE, CELL_SIZE));

            let shade = if (file + rank) % 2 == 1 {
                iced::Color::from_rgb8(238, 238, 238)
            } else {
                iced::Color::WHITE
            };
            frame.fill(&cell, shade);

            if game.legal_destinations().contains(&square) {
                frame.fill(&cell, iced::Color::from_rgba8(100, 200, 100, 0.5));
            }

            frame.stroke(&cell, Stroke::default().with_width(1.0));

            if let Some(piece) = game.board().get(square) {
                let color = if piece.color == Color::White {
                    iced::Color::from_rgb8(0, 0, 0)
                } else {
                    iced::Color::from_rgb8(136, 0, 0)
                };
                let glyph = canvas::Text {
                    content: piece.glyph().to_string(),
                    position: Point::new(
                        origin.x + CELL_SIZE / 2.0,
                        origin.y + CELL_SIZE / 2.0,
                    ),
                    color,
                    size: Pixels(CELL_SIZE * 0.6),
                    font: iced::Font::default(),
                    horizontal_alignment: iced::alignment::Horizontal::Center,
                    vertical_alignment: iced::alignment::Vertical::Center,
                    line_height: iced::widget::text::LineHeight::default(),
                    shaping: iced::widget::text::Shaping::Advanced,
                };
                frame.fill_text(glyph);
            }
        }
    }
}

fn draw_selection(game: &Game, frame: &mut Frame) {
    if let Some(square) = game.selected() {
        let origin = cell_origin(square);
        let outline = Path::rectangle(
            Point::new(origin.x + 2.0, origin.y + 2.0),
            Size::new(CELL_SIZE - 4.0, CELL_SIZE - 4.0),
        );
        frame.stroke(
            &outline,
            Stroke::default()
                .with_width(3.0)
                .with_color(iced::Color::from_rgb8(0, 0, 255)),
        );
    }
}

fn cell_origin(square: Square) -> Point {
    Point::new(
        (square.file() as f32 + 1.0) * CELL_SIZE,
        (square.rank() as f32 + 1.0) * CELL_SIZE,
    )
}

fn fill_label(frame: &mut Frame, content: String, position: Point) {
    let label = canvas::Text {
        content,
        position,
        color: iced::Color::from_rgb8(0, 0, 0),
        size: Pixels(CELL_SIZE * 0.4),
        font: iced::Font::default(),
        horizontal_alignment: iced::alignment::Horizontal::Center,
        vertical_alignment: iced::alignment::Vertical::Center,
        line_height: iced::widget::text::LineHeight::default(),
        shaping: iced::widget::text::Shaping::Basic,
    };
    frame.fill_text(label);
}

fn outcome_message(outcome: Outcome) -> String {
    match outcome {
        Outcome::Checkmate { winner } => format!("{winner:?} wins by checkmate!"),
        Outcome::Stalemate => String::from("Stalemate! It's a draw."),
    }
}
