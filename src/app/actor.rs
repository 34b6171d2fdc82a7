//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial fetch, then first frame with the loading indicator
        let mount = self.state.mount();
        self.send(mount);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::warn!("Network actor is gone, command dropped");
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // List navigation
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectFirst => self.state.select_first(),
            UiEvent::SelectLast => self.state.select_last(),

            // Row actions
            UiEvent::AddBook => self.state.add_book(),
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::ShowSelected => self.state.show_selected(),
            UiEvent::DeleteSelected => {
                if let Some(cmd) = self.state.delete_selected() {
                    self.send(cmd);
                }
            }
            UiEvent::Reload => {
                if let Some(cmd) = self.state.reload() {
                    self.send(cmd);
                }
            }

            // Editor
            UiEvent::EditorChar(c) => self.state.editor_char(c),
            UiEvent::EditorBackspace => self.state.editor_backspace(),
            UiEvent::EditorCursorLeft => self.state.editor_cursor_left(),
            UiEvent::EditorCursorRight => self.state.editor_cursor_right(),
            UiEvent::EditorNextField => self.state.editor_next_field(),
            UiEvent::EditorPrevField => self.state.editor_prev_field(),
            UiEvent::EditorEnter => self.state.editor_enter(),
            UiEvent::EditorSave => {
                if let Some(cmd) = self.state.save_editor() {
                    self.send(cmd);
                }
            }
            UiEvent::EditorCancel => self.state.cancel_editor(),

            // Detail
            UiEvent::CloseDetail => self.state.close_detail(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => {
                if self.state.accepts_quit() {
                    return true;
                }
                tracing::debug!("Quit ignored while a dialog is open");
            }
            UiEvent::ForceQuit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::DialogView;
    use crate::models::{Book, BookPayload};

    #[tokio::test]
    async fn test_actor_mounts_and_routes_commands() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::default(), net_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        let Some(NetworkCommand::FetchBooks { id }) = net_cmd_rx.recv().await else {
            panic!("first command must be the initial fetch");
        };
        let first = render_rx.recv().await.unwrap();
        assert!(first.is_loading);

        let book = Book {
            id: 5,
            title: "Old".into(),
            body: "b".into(),
            ..Book::default()
        };
        net_resp_tx
            .send(NetworkResponse::BooksFetched { id, books: vec![book] })
            .unwrap();
        let loaded = render_rx.recv().await.unwrap();
        assert_eq!(loaded.books.len(), 1);
        assert!(!loaded.is_loading);

        ui_tx.send(UiEvent::EditSelected).unwrap();
        ui_tx.send(UiEvent::EditorChar('!')).unwrap();
        ui_tx.send(UiEvent::EditorSave).unwrap();
        let Some(NetworkCommand::UpdateBook { book_id, payload, .. }) = net_cmd_rx.recv().await else {
            panic!("save must issue an update");
        };
        assert_eq!(book_id, 5);
        assert_eq!(payload, BookPayload::new("Old!", "b"));

        ui_tx.send(UiEvent::EditorCancel).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_quit_while_editing_keeps_session() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::default(), net_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        let Some(NetworkCommand::FetchBooks { id }) = net_cmd_rx.recv().await else {
            panic!("first command must be the initial fetch");
        };
        let book = Book {
            id: 3,
            title: "Draft".into(),
            ..Book::default()
        };
        net_resp_tx
            .send(NetworkResponse::BooksFetched { id, books: vec![book] })
            .unwrap();
        render_rx.recv().await.unwrap();
        let loaded = render_rx.recv().await.unwrap();
        assert_eq!(loaded.books.len(), 1);

        // A 'q' mapped against the list before the editor frame arrived
        ui_tx.send(UiEvent::EditSelected).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        ui_tx.send(UiEvent::EditorSave).unwrap();
        let Some(NetworkCommand::UpdateBook { book_id, .. }) = net_cmd_rx.recv().await else {
            panic!("editor must survive the quit and save");
        };
        assert_eq!(book_id, 3);

        let mut last = None;
        while let Ok(state) = render_rx.try_recv() {
            last = Some(state);
        }
        assert!(matches!(last.unwrap().dialog, DialogView::Editor(_)));

        // Ctrl+C still ends the session from inside the editor
        ui_tx.send(UiEvent::ForceQuit).unwrap();
        assert_eq!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown));
        handle.await.unwrap();

        // The closed render channel is what ends the UI loop
        while render_rx.recv().await.is_some() {}
        assert!(render_rx.try_recv().is_err());
    }
}
