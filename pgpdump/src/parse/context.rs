//! Message-scoped decoder state.

use crate::{Error, Item, Options, Result};
use crate::types::{Duration, Timestamp, format_seconds};

/// How far decoders may recurse into nested structures.
///
/// Embedded signatures, compressed data, and the subkey redirects all
/// recurse.  Decoding fails with [`Error::RecursionLimit`] once this
/// depth is exceeded.
///
///   [`Error::RecursionLimit`]: ../enum.Error.html#variant.RecursionLimit
pub const MAX_RECURSION_DEPTH: usize = 16;

/// How many bytes compressed data packets may inflate to in total.
///
/// The budget covers every compressed data packet of one message,
/// at any nesting depth.
pub const MAX_INFLATED_SIZE: u64 = 64 * 1024 * 1024;

/// What is known about the symmetric algorithm protecting the next
/// encrypted data packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncryptionMode {
    /// No session key packet was seen.
    NotSpecified,
    /// A symmetric-key encrypted session key packet was seen.
    SymmetricKeyKnown,
    /// A public-key encrypted session key packet was seen.
    PublicKeyKnown,
}

impl Default for EncryptionMode {
    fn default() -> Self {
        EncryptionMode::NotSpecified
    }
}

/// State shared by the decoders while dumping one message.
///
/// A `Context` lives exactly as long as one call to
/// [`Parser::parse`].
///
///   [`Parser::parse`]: struct.Parser.html#method.parse
#[derive(Clone, Debug)]
pub struct Context {
    options: Options,
    mode: EncryptionMode,
    sig_creation_time: Option<Timestamp>,
    key_creation_time: Option<Timestamp>,
    depth: usize,
    inflated: u64,
}

impl Context {
    /// Creates a fresh context.
    pub fn new(options: Options) -> Self {
        Context {
            options,
            mode: EncryptionMode::NotSpecified,
            sig_creation_time: None,
            key_creation_time: None,
            depth: 0,
            inflated: 0,
        }
    }

    /// Returns the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the encryption mode.
    pub fn mode(&self) -> EncryptionMode {
        self.mode
    }

    /// Sets the encryption mode.
    pub fn set_mode(&mut self, mode: EncryptionMode) {
        self.mode = mode;
    }

    /// Returns the encryption mode and resets it.
    pub fn take_mode(&mut self) -> EncryptionMode {
        std::mem::replace(&mut self.mode, EncryptionMode::NotSpecified)
    }

    /// Remembers the creation time of the signature being decoded.
    pub fn set_sig_creation_time(&mut self, t: Timestamp) {
        self.sig_creation_time = Some(t);
    }

    /// Returns the pending signature creation time and clears it.
    pub fn take_sig_creation_time(&mut self) -> Option<Timestamp> {
        self.sig_creation_time.take()
    }

    /// Remembers the creation time of the key being decoded.
    pub fn set_key_creation_time(&mut self, t: Timestamp) {
        self.key_creation_time = Some(t);
    }

    /// Returns the pending key creation time and clears it.
    pub fn take_key_creation_time(&mut self) -> Option<Timestamp> {
        self.key_creation_time.take()
    }

    /// Reinstates previously taken creation times.
    pub(crate) fn restore_creation_times(&mut self, sig: Option<Timestamp>,
                                         key: Option<Timestamp>) {
        self.sig_creation_time = sig;
        self.key_creation_time = key;
    }

    /// Returns the current recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns how many more bytes may be inflated.
    pub(crate) fn inflation_budget(&self) -> u64 {
        MAX_INFLATED_SIZE.saturating_sub(self.inflated)
    }

    /// Records that `n` bytes have been inflated.
    pub(crate) fn charge_inflated(&mut self, n: u64) {
        self.inflated = self.inflated.saturating_add(n);
    }

    /// Runs `f` one recursion level deeper.
    pub(crate) fn nested<T, F>(&mut self, f: F) -> Result<T>
        where F: FnOnce(&mut Context) -> Result<T>
    {
        if self.depth >= MAX_RECURSION_DEPTH {
            log::warn!("Refusing to recurse deeper than {} levels",
                       MAX_RECURSION_DEPTH);
            return Err(Error::RecursionLimit(MAX_RECURSION_DEPTH).into());
        }

        self.depth += 1;
        log::trace!("Entering recursion level {}", self.depth);
        let r = f(self);
        self.depth -= 1;
        r
    }

    /// Renders a timestamp honoring the time zone option.
    pub fn format_time(&self, t: Timestamp) -> String {
        t.to_rfc3339(self.options.get_utc())
    }

    /// Describes a time field.
    pub(crate) fn time_item(&self, name: &str, t: Timestamp) -> Item {
        Item::new(name).value(self.format_time(t))
            .dump_if(self.options.get_debug(),
                     crate::fmt::hex::dump(&u32::from(t).to_be_bytes()))
    }

    /// Describes an expiration time relative to `base`.
    ///
    /// If the base is known and not zero, the absolute end time is
    /// returned as value and the duration as note.  Otherwise only
    /// the duration is available.  A duration of zero never expires.
    pub fn expiration(&self, base: Option<Timestamp>, d: Duration)
                      -> (String, Option<String>) {
        if d.as_secs() == 0 {
            return ("never".into(), None);
        }
        match base {
            Some(base) if ! base.is_zero() =>
                (format_seconds(base.add(d), self.options.get_utc()),
                 Some(d.relative())),
            _ => (d.relative(), None),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mode_is_taken() {
        let mut cx = Context::new(Options::default());
        assert_eq!(cx.mode(), EncryptionMode::NotSpecified);
        cx.set_mode(EncryptionMode::SymmetricKeyKnown);
        assert_eq!(cx.take_mode(), EncryptionMode::SymmetricKeyKnown);
        assert_eq!(cx.mode(), EncryptionMode::NotSpecified);
    }

    #[test]
    fn recursion_is_bounded() {
        fn recurse(cx: &mut Context, levels: &mut usize) -> Result<()> {
            cx.nested(|cx| {
                *levels += 1;
                recurse(cx, levels)
            })
        }

        let mut cx = Context::new(Options::default());
        let mut levels = 0;
        let err = recurse(&mut cx, &mut levels).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(),
                   Some(&Error::RecursionLimit(MAX_RECURSION_DEPTH)));
        assert_eq!(levels, MAX_RECURSION_DEPTH);
        assert_eq!(cx.depth(), 0);
    }

    #[test]
    fn expiration() {
        let cx = Context::new(Options::default().utc(true));
        let base = Timestamp::from(1515373928);
        let d = Duration::from(86400 * 2);

        assert_eq!(cx.expiration(Some(base), d),
                   ("2018-01-10T01:12:08Z".into(), Some("2.0 days after".into())));
        assert_eq!(cx.expiration(None, d), ("2.0 days after".into(), None));
        assert_eq!(cx.expiration(Some(Timestamp::from(0)), d),
                   ("2.0 days after".into(), None));
        assert_eq!(cx.expiration(Some(base), Duration::from(0)),
                   ("never".into(), None));
    }

    #[test]
    fn inflation_budget() {
        let mut cx = Context::new(Options::default());
        assert_eq!(cx.inflation_budget(), MAX_INFLATED_SIZE);
        cx.charge_inflated(1024);
        assert_eq!(cx.inflation_budget(), MAX_INFLATED_SIZE - 1024);
        cx.charge_inflated(MAX_INFLATED_SIZE);
        assert_eq!(cx.inflation_budget(), 0);
    }

    #[test]
    fn creation_times_are_consumed() {
        let mut cx = Context::new(Options::default());
        cx.set_sig_creation_time(Timestamp::from(1));
        assert_eq!(cx.take_sig_creation_time(), Some(Timestamp::from(1)));
        assert_eq!(cx.take_sig_creation_time(), None);
        assert_eq!(cx.take_key_creation_time(), None);
    }
}
