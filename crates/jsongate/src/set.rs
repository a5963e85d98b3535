//! Setters: building a document value by value.

use alloc::{
    borrow::Cow,
    string::{String, ToString},
};

use crate::{
    error::{ErrorKind, JsonType, Result},
    escape::escape,
    get::ValueRef,
    out::{Handle, List, OutValue, Slot},
    session::{Phase, Session},
};

mod sealed {
    pub trait Sealed {}
}

/// Numeric types [`Session::set_num`] accepts.
///
/// Integers are written in decimal. Floats are written in the shortest form
/// that reads back as the same value.
///
/// This trait is sealed.
pub trait Number: Copy + sealed::Sealed {
    #[doc(hidden)]
    fn to_json(self) -> Result<String>;
}

macro_rules! impl_int_number {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl Number for $ty {
            fn to_json(self) -> Result<String> {
                Ok(self.to_string())
            }
        }
    )*};
}

impl_int_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_number {
    ($($ty:ty),*) => {$(
        impl sealed::Sealed for $ty {}

        impl Number for $ty {
            fn to_json(self) -> Result<String> {
                if !self.is_finite() {
                    return Err(ErrorKind::SetNumNotFinite.into());
                }
                Ok(ryu::Buffer::new().format_finite(self).into())
            }
        }
    )*};
}

impl_float_number!(f32, f64);

impl<'src> Session<'src> {
    fn check_set(&self) -> Result<()> {
        match self.phase() {
            Phase::Empty | Phase::Building => Ok(()),
            _ => Err(ErrorKind::StateNotSet.into()),
        }
    }

    fn set(&mut self, slot: Slot<'_>, value: OutValue<'src>) -> Result<Handle> {
        self.check_set()?;
        let handle = self.out.insert(slot, value)?;
        self.set_phase(Phase::Building);
        Ok(handle)
    }

    /// Sets `null` at `slot`.
    ///
    /// # Errors
    ///
    /// Every setter fails with [`ErrorKind::StateNotSet`] on a parsed or
    /// failed session or after generation, [`ErrorKind::RootAlreadySet`],
    /// [`ErrorKind::SetNotArr`] or [`ErrorKind::SetNotObj`] when the slot is
    /// unusable, and [`ErrorKind::SetDuplicateKey`] when the key is taken.
    pub fn set_null(&mut self, slot: Slot<'_>) -> Result<Handle> {
        self.set(slot, OutValue::Null)
    }

    /// Sets a boolean at `slot`.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_bool(&mut self, slot: Slot<'_>, value: bool) -> Result<Handle> {
        self.set(slot, OutValue::Bool(value))
    }

    /// Sets a number at `slot`.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null), plus
    /// [`ErrorKind::SetNumNotFinite`] for NaN and infinities.
    pub fn set_num<N: Number>(&mut self, slot: Slot<'_>, value: N) -> Result<Handle> {
        self.check_set()?;
        let text = value.to_json()?;
        self.set(slot, OutValue::Number(text))
    }

    /// Sets a string at `slot`, escaping it as needed.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_str(&mut self, slot: Slot<'_>, value: &str) -> Result<Handle> {
        self.check_set()?;
        let escaped = escape(value)?;
        self.set(slot, OutValue::String(Cow::Owned(escaped)))
    }

    /// Sets a string at `slot` from text that is already valid JSON string
    /// content, escapes included. The text is copied as is.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_json_str(&mut self, slot: Slot<'_>, escaped: &str) -> Result<Handle> {
        self.check_set()?;
        let mut owned = String::new();
        owned.try_reserve_exact(escaped.len())?;
        owned.push_str(escaped);
        self.set(slot, OutValue::String(Cow::Owned(owned)))
    }

    /// Like [`set_json_str`](Self::set_json_str), but borrows the text for
    /// the life of the session instead of copying it.
    ///
    /// ```rust
    /// use jsongate::{Session, Slot, Whitespace};
    ///
    /// let greeting = String::from("caf\\u00e9");
    /// let mut session = Session::new();
    /// session.set_caller_str(Slot::Root, &greeting)?;
    /// let compact = Whitespace {
    ///     compact: true,
    ///     ..Default::default()
    /// };
    /// assert_eq!(session.generate(&compact)?, "\"caf\\u00e9\"");
    /// # Ok::<(), jsongate::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_caller_str(&mut self, slot: Slot<'_>, escaped: &'src str) -> Result<Handle> {
        self.set(slot, OutValue::String(Cow::Borrowed(escaped)))
    }

    /// Sets an empty array at `slot`. Fill it through the returned handle.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_arr(&mut self, slot: Slot<'_>) -> Result<Handle> {
        self.set(slot, OutValue::Array(List::default()))
    }

    /// Sets an empty object at `slot`. Fill it through the returned handle.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_obj(&mut self, slot: Slot<'_>) -> Result<Handle> {
        self.set(slot, OutValue::Object(List::default()))
    }

    /// Copies a parsed value, with everything nested in it, to `slot`.
    ///
    /// Strings and numbers are copied exactly as they were written.
    ///
    /// # Errors
    ///
    /// As for [`set_null`](Self::set_null).
    pub fn set_value(&mut self, slot: Slot<'_>, value: ValueRef<'_>) -> Result<Handle> {
        if let Some(b) = value.as_bool() {
            return self.set_bool(slot, b);
        }
        if let Some(text) = value.number_text() {
            self.check_set()?;
            let mut owned = String::new();
            owned.try_reserve_exact(text.len())?;
            owned.push_str(text);
            return self.set(slot, OutValue::Number(owned));
        }
        if let Some(escaped) = value.raw_str() {
            return self.set_json_str(slot, escaped);
        }
        match value.json_type() {
            JsonType::Array => {
                let arr = self.set_arr(slot)?;
                for item in value.items() {
                    self.set_value(arr.push(), item)?;
                }
                Ok(arr)
            }
            JsonType::Object => {
                let obj = self.set_obj(slot)?;
                for (key, item) in value.entries() {
                    self.set_value(obj.key(&key), item)?;
                }
                Ok(obj)
            }
            _ => self.set_null(slot),
        }
    }
}
