//! Typed property access
//!
//! Shorthands over [`Channel::perform`] for the common reads and writes:
//! user info values, parameter properties and stored messages. Scalar
//! values travel little-endian; a response too short for the requested
//! type decodes as zero, like the raw accessors.

use scomlink_hal::Serial;
use scomlink_protocol::property::{encode_f32, encode_u16, encode_u32};
use scomlink_protocol::{Error, ParameterProperty, QspLevel, Transaction};

use crate::channel::{Channel, Reply};

/// Scalar values are at most 4 bytes, plus room for the terminator
const SCALAR_BUFFER_SIZE: usize = 8;

impl<S: Serial> Channel<S> {
    fn read_scalar(
        &mut self,
        tx: &Transaction<'_>,
    ) -> Result<([u8; SCALAR_BUFFER_SIZE], Reply), Error> {
        let mut buf = [0u8; SCALAR_BUFFER_SIZE];
        let reply = self.perform(tx, &mut buf)?;
        Ok((buf, reply))
    }

    fn write_scalar(&mut self, tx: &Transaction<'_>) -> Result<(), Error> {
        let mut buf = [0u8; SCALAR_BUFFER_SIZE];
        self.perform(tx, &mut buf).map(|_| ())
    }

    /// Read a user info value as a float
    pub fn read_user_info_float(&mut self, destination: u32, object_id: u32) -> Result<f32, Error> {
        let tx = Transaction::read_user_info(destination, object_id);
        let (buf, reply) = self.read_scalar(&tx)?;
        Ok(reply.as_float(&buf))
    }

    /// Read a user info value as an integer
    pub fn read_user_info_int(&mut self, destination: u32, object_id: u32) -> Result<u32, Error> {
        let tx = Transaction::read_user_info(destination, object_id);
        let (buf, reply) = self.read_scalar(&tx)?;
        Ok(reply.as_integer(&buf))
    }

    /// Read a parameter property as a float
    pub fn read_parameter_float(
        &mut self,
        destination: u32,
        object_id: u32,
        property: ParameterProperty,
    ) -> Result<f32, Error> {
        let tx = Transaction::read_parameter(destination, object_id, property);
        let (buf, reply) = self.read_scalar(&tx)?;
        Ok(reply.as_float(&buf))
    }

    /// Read a parameter property as an integer
    pub fn read_parameter_int(
        &mut self,
        destination: u32,
        object_id: u32,
        property: ParameterProperty,
    ) -> Result<u32, Error> {
        let tx = Transaction::read_parameter(destination, object_id, property);
        let (buf, reply) = self.read_scalar(&tx)?;
        Ok(reply.as_integer(&buf))
    }

    /// Read the access level of a parameter
    ///
    /// A level outside the known tiers is `InvalidFrame`.
    pub fn read_parameter_level(
        &mut self,
        destination: u32,
        object_id: u32,
    ) -> Result<QspLevel, Error> {
        let raw = self.read_parameter_int(destination, object_id, ParameterProperty::LevelQsp)?;
        QspLevel::from_u32(raw).ok_or(Error::InvalidFrame)
    }

    /// Write a float parameter, persisted by the device
    pub fn write_parameter_float(
        &mut self,
        destination: u32,
        object_id: u32,
        value: f32,
    ) -> Result<(), Error> {
        let value = encode_f32(value);
        self.write_scalar(&Transaction::write_parameter_value(destination, object_id, &value))
    }

    /// Write a 32-bit parameter, persisted by the device
    pub fn write_parameter_u32(
        &mut self,
        destination: u32,
        object_id: u32,
        value: u32,
    ) -> Result<(), Error> {
        let value = encode_u32(value);
        self.write_scalar(&Transaction::write_parameter_value(destination, object_id, &value))
    }

    /// Write a 16-bit parameter, persisted by the device
    pub fn write_parameter_u16(
        &mut self,
        destination: u32,
        object_id: u32,
        value: u16,
    ) -> Result<(), Error> {
        let value = encode_u16(value);
        self.write_scalar(&Transaction::write_parameter_value(destination, object_id, &value))
    }

    /// Write a float parameter to RAM only
    pub fn write_parameter_unsaved_float(
        &mut self,
        destination: u32,
        object_id: u32,
        value: f32,
    ) -> Result<(), Error> {
        let value = encode_f32(value);
        self.write_scalar(&Transaction::write_parameter_unsaved_value(
            destination,
            object_id,
            &value,
        ))
    }

    /// Write a 32-bit parameter to RAM only
    pub fn write_parameter_unsaved_u32(
        &mut self,
        destination: u32,
        object_id: u32,
        value: u32,
    ) -> Result<(), Error> {
        let value = encode_u32(value);
        self.write_scalar(&Transaction::write_parameter_unsaved_value(
            destination,
            object_id,
            &value,
        ))
    }

    /// Write a 16-bit parameter to RAM only
    pub fn write_parameter_unsaved_u16(
        &mut self,
        destination: u32,
        object_id: u32,
        value: u16,
    ) -> Result<(), Error> {
        let value = encode_u16(value);
        self.write_scalar(&Transaction::write_parameter_unsaved_value(
            destination,
            object_id,
            &value,
        ))
    }

    /// Read a stored message into `buf`
    pub fn read_message(
        &mut self,
        destination: u32,
        index: u32,
        buf: &mut [u8],
    ) -> Result<Reply, Error> {
        self.perform(&Transaction::read_message(destination, index), buf)
    }
}
