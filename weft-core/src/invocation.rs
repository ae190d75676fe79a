//! Invocation descriptors.
//!
//! An [`Invocation`] captures one intercepted call: the target method's
//! identity, the actual argument values, and the proceed capability that
//! invokes the real underlying method. It is owned exclusively by the call
//! that created it and discarded when the call completes.

use crate::error::{BoxError, InterceptError};
use crate::shape::ReturnType;
use crate::value::{ErasedValue, ReturnValue};
use std::any::{Any, type_name};
use std::fmt;

/// Identity of one declared parameter of an intercepted method.
#[derive(Clone, Copy, Debug)]
pub struct ParamInfo {
    name: &'static str,
    type_name: &'static str,
}

impl ParamInfo {
    /// Describe a parameter named `name` of type `T`.
    pub fn of<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            type_name: type_name::<T>(),
        }
    }

    /// The declared parameter name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared parameter type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Identity of an intercepted method.
#[derive(Clone, Debug)]
pub struct MethodInfo {
    name: &'static str,
    return_type: ReturnType,
    params: Vec<ParamInfo>,
}

impl MethodInfo {
    /// Describe a method by name, declared return type, and parameters.
    pub fn new(name: &'static str, return_type: ReturnType, params: Vec<ParamInfo>) -> Self {
        Self {
            name,
            return_type,
            params,
        }
    }

    /// The method name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared return type identity.
    pub fn return_type(&self) -> &ReturnType {
        &self.return_type
    }

    /// The declared parameters, in positional order.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }
}

/// One positional argument value captured for an invocation.
///
/// The `Debug` rendering is captured at construction so the signature can be
/// formatted later without re-borrowing the typed value.
pub struct Arg {
    value: ErasedValue,
    rendered: String,
}

impl Arg {
    /// Capture an argument value.
    pub fn new(value: impl Any + Send + fmt::Debug) -> Self {
        Self {
            rendered: format!("{value:?}"),
            value: Box::new(value),
        }
    }

    /// Borrow the argument as a `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// The rendering captured at construction.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

type ProceedFn = Box<dyn FnOnce() -> Result<ReturnValue, BoxError> + Send>;

/// A captured intercepted call.
pub struct Invocation {
    method: MethodInfo,
    args: Vec<Arg>,
    proceed: Option<ProceedFn>,
}

impl Invocation {
    /// Start building an invocation of `name` with the given declared return
    /// type.
    pub fn builder(name: &'static str, return_type: ReturnType) -> InvocationBuilder {
        InvocationBuilder {
            name,
            return_type,
            params: Vec::new(),
            args: Vec::new(),
        }
    }

    /// The target method's identity.
    pub fn method(&self) -> &MethodInfo {
        &self.method
    }

    /// The actual argument values, in positional order.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Typed access to the argument at `index`.
    pub fn arg<T: Any>(&self, index: usize) -> Option<&T> {
        self.args.get(index)?.downcast_ref()
    }

    /// Invoke the real underlying method and return its raw result.
    ///
    /// The proceed capability is consumable exactly once; a second call fails
    /// with [`InterceptError::ProceedConsumed`].
    pub fn proceed(&mut self) -> Result<ReturnValue, BoxError> {
        let proceed = self
            .proceed
            .take()
            .ok_or(InterceptError::ProceedConsumed {
                method: self.method.name(),
            })?;
        proceed()
    }

    /// Whether the proceed capability is still available.
    pub fn can_proceed(&self) -> bool {
        self.proceed.is_some()
    }

    /// Human-readable signature:
    /// `return_type name(param_type param = value, ...)`.
    pub fn signature(&self) -> String {
        let params = self
            .method
            .params()
            .iter()
            .zip(&self.args)
            .map(|(param, arg)| format!("{} {} = {}", param.type_name(), param.name(), arg.rendered()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} {}({})", self.method.return_type().name(), self.method.name(), params)
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("method", &self.method)
            .field("args", &self.args)
            .field("can_proceed", &self.can_proceed())
            .finish()
    }
}

/// Builder for [`Invocation`].
pub struct InvocationBuilder {
    name: &'static str,
    return_type: ReturnType,
    params: Vec<ParamInfo>,
    args: Vec<Arg>,
}

impl InvocationBuilder {
    /// Append a named argument, recording both its declared parameter
    /// identity and its actual value.
    pub fn arg<T: Any + Send + fmt::Debug>(mut self, name: &'static str, value: T) -> Self {
        self.params.push(ParamInfo::of::<T>(name));
        self.args.push(Arg::new(value));
        self
    }

    /// Finish the descriptor with its proceed capability.
    pub fn build(
        self,
        proceed: impl FnOnce() -> Result<ReturnValue, BoxError> + Send + 'static,
    ) -> Invocation {
        Invocation {
            method: MethodInfo::new(self.name, self.return_type, self.params),
            args: self.args,
            proceed: Some(Box::new(proceed)),
        }
    }
}
