pub enum Message {
    Decoding(usize),
    Resizing { from: (u32, u32), to: (u32, u32) },
    CreatingPin(usize),
    Computing(usize),
}

pub trait Verboser {
    fn verbose(&mut self, message: Message);
}

pub struct Silent;

impl Verboser for Silent {
    fn verbose(&mut self, _: Message) {}
}

/// Forwards every message to `tracing` at trace level.
pub struct Tracing;

impl Verboser for Tracing {
    fn verbose(&mut self, message: Message) {
        match message {
            Message::Decoding(bytes) => tracing::trace!(bytes, "decoding image"),
            Message::Resizing { from, to } => {
                tracing::trace!(?from, ?to, "resizing to working resolution")
            }
            Message::CreatingPin(idx) => tracing::trace!(pin = idx, "creating pin"),
            Message::Computing(lines) => tracing::trace!(lines, "computing next line"),
        }
    }
}

impl<V: Verboser + ?Sized> Verboser for &mut V {
    fn verbose(&mut self, message: Message) {
        (**self).verbose(message)
    }
}
