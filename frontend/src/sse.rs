//! Server-push alert stream.
//!
//! Every event's `data` is validated against [`Alert`]; malformed events are
//! logged and dropped. The stream is never reopened: an error closes it for
//! good, and so does closing or dropping the [`AlertStream`] handle.

use std::{any::Any, cell::Cell, rc::Rc};

use common::req::Alert;

use crate::error::Result;

/// The underlying push connection, closable from several places.
pub trait Connection {
    fn close(&self);
}

pub(crate) struct StreamState {
    conn: Box<dyn Connection>,
    open: Cell<bool>,
}

impl StreamState {
    pub(crate) fn new(conn: impl Connection + 'static) -> Self {
        Self {
            conn: Box::new(conn),
            open: Cell::new(true),
        }
    }

    /// Closes the connection if it is still open. Returns whether this call
    /// did the closing.
    pub(crate) fn close(&self) -> bool {
        if self.open.replace(false) {
            self.conn.close();
            true
        } else {
            false
        }
    }
}

/// Owning handle for an open alert stream.
pub struct AlertStream {
    state: Rc<StreamState>,
    // event listeners must outlive every callback the connection can fire
    _listeners: Box<dyn Any>,
}

impl AlertStream {
    pub(crate) fn new(state: Rc<StreamState>, listeners: Box<dyn Any>) -> Self {
        Self {
            state,
            _listeners: listeners,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.open.get()
    }

    pub fn close(&self) {
        if self.state.close() {
            log::info!("alert stream closed");
        }
    }
}

impl Drop for AlertStream {
    fn drop(&mut self) {
        self.close();
    }
}

pub(crate) fn decode_alert(data: &str) -> Option<Alert> {
    match serde_json::from_str::<Alert>(data) {
        Ok(alert) => Some(alert),
        Err(err) => {
            log::warn!("dropping malformed alert event: {err}");
            None
        }
    }
}

pub(crate) fn deliver(data: &str, on_message: &mut impl FnMut(Alert)) {
    if let Some(alert) = decode_alert(data) {
        on_message(alert);
    }
}

#[cfg(target_arch = "wasm32")]
impl Connection for web_sys::EventSource {
    fn close(&self) {
        web_sys::EventSource::close(self)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn open(url: &str, mut on_message: impl FnMut(Alert) + 'static) -> Result<AlertStream> {
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{Event, EventSource, EventSourceInit, MessageEvent};

    use crate::error::ApiError;

    let mut init = EventSourceInit::new();
    init.with_credentials(true);
    let es = EventSource::new_with_event_source_init_dict(url, &init)
        .map_err(|err| ApiError::Stream(format!("{err:?}")))?;
    log::info!("alert stream opened: {url}");

    let state = Rc::new(StreamState::new(es.clone()));

    let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
        match e.data().as_string() {
            Some(data) => deliver(&data, &mut on_message),
            None => log::warn!("ignoring non-text alert event"),
        }
    });
    es.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

    let error_state = state.clone();
    let onerror = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        if error_state.close() {
            log::warn!("alert stream error, connection closed");
        }
    });
    es.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    Ok(AlertStream::new(state, Box::new((onmessage, onerror))))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open(url: &str, _on_message: impl FnMut(Alert) + 'static) -> Result<AlertStream> {
    Err(crate::error::ApiError::Stream(format!(
        "{url}: EventSource is only available in the browser"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct FakeConnection {
        closed: Rc<Cell<usize>>,
    }

    impl Connection for FakeConnection {
        fn close(&self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    fn stream() -> (AlertStream, Rc<StreamState>, Rc<Cell<usize>>) {
        let conn = FakeConnection::default();
        let closed = conn.closed.clone();
        let state = Rc::new(StreamState::new(conn));
        (AlertStream::new(state.clone(), Box::new(())), state, closed)
    }

    #[test]
    fn handler_sees_alerts_in_arrival_order() {
        let seen = RefCell::new(Vec::new());
        let mut handler = |alert: Alert| seen.borrow_mut().push(alert);

        deliver(
            r#"{"id":"1","message":"Door opened","timestamp":"2024-01-01T00:00:00Z"}"#,
            &mut handler,
        );
        deliver(
            r#"{"id":"2","message":"Motion detected","timestamp":"2024-01-01T00:01:00Z"}"#,
            &mut handler,
        );

        let seen = seen.into_inner();
        assert_eq!(
            seen,
            vec![
                Alert {
                    id: "1".to_owned(),
                    message: "Door opened".to_owned(),
                    timestamp: "2024-01-01T00:00:00Z".to_owned(),
                },
                Alert {
                    id: "2".to_owned(),
                    message: "Motion detected".to_owned(),
                    timestamp: "2024-01-01T00:01:00Z".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn malformed_events_are_dropped() {
        let mut count = 0;
        let mut handler = |_: Alert| count += 1;
        deliver("not json", &mut handler);
        deliver(r#"{"id":"1","message":"no timestamp"}"#, &mut handler);
        deliver(r#"{"id":"3","message":"ok","timestamp":"t"}"#, &mut handler);
        assert_eq!(count, 1);
    }

    #[test]
    fn drop_closes_exactly_once() {
        let (stream, _state, closed) = stream();
        assert!(stream.is_open());
        stream.close();
        stream.close();
        drop(stream);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn error_close_then_unmount_closes_once() {
        let (stream, state, closed) = stream();
        // what the error listener does
        assert!(state.close());
        assert!(!stream.is_open());
        drop(stream);
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn native_open_is_refused() {
        assert!(open("http://127.0.0.1:8081/api/sse/alerts", |_| {}).is_err());
    }
}
