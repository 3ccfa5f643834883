//! Compute device registry and the in-order device command queue.
//!
//! A [`Device`] owns a dedicated thread holding two cell buffers. The host
//! talks to it only through a command channel: upload, kernel launches,
//! barriers and read-back are executed strictly in submission order, so a
//! barrier after the kernels of one generation is a full fence.

use std::fmt;
use std::str::FromStr;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use super::kernels;
use super::layout::KernelLayout;
use crate::error::EngineError;

/// Kind of compute device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Host processor.
    Cpu,
    /// Graphics processor.
    Gpu,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            Self::Gpu => f.write_str("gpu"),
        }
    }
}

/// Which device the offload engine should ask for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DevicePreference {
    /// First device found, GPU before CPU.
    #[default]
    Any,
    /// Host processor only.
    Cpu,
    /// GPU, falling back to the host processor if none is present.
    Gpu,
}

impl FromStr for DevicePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "cpu" => Ok(Self::Cpu),
            "gpu" => Ok(Self::Gpu),
            other => Err(format!("unknown device '{other}', expected cpu or gpu")),
        }
    }
}

impl fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Cpu => f.write_str("cpu"),
            Self::Gpu => f.write_str("gpu"),
        }
    }
}

/// A compute device offered by [`discover`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device kind.
    pub kind: DeviceKind,
    /// Human-readable name.
    pub name: String,
    /// Parallel compute units available to kernels.
    pub compute_units: usize,
}

impl DeviceInfo {
    /// The host processor, with one compute unit per available hardware thread.
    pub fn host() -> Self {
        let compute_units = std::thread::available_parallelism().map_or(1, usize::from);
        Self {
            kind: DeviceKind::Cpu,
            name: "host-cpu".to_string(),
            compute_units,
        }
    }
}

/// Devices available in this process, GPUs first.
///
/// Only the host processor is currently registered.
pub fn discover() -> Vec<DeviceInfo> {
    vec![DeviceInfo::host()]
}

/// Pick a device for `preference`.
///
/// A GPU request with no GPU present falls back to the host processor with
/// a warning.
pub fn select(preference: DevicePreference) -> DeviceInfo {
    let devices = discover();
    let wanted = match preference {
        DevicePreference::Any => devices.first(),
        DevicePreference::Cpu => devices.iter().find(|d| d.kind == DeviceKind::Cpu),
        DevicePreference::Gpu => devices.iter().find(|d| d.kind == DeviceKind::Gpu),
    };
    match wanted {
        Some(device) => device.clone(),
        None => {
            tracing::warn!(
                requested = %preference,
                "no matching compute device, using the host processor"
            );
            DeviceInfo::host()
        }
    }
}

// ── Command queue ───────────────────────────────────────────────

/// A kernel the device can launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kernel {
    /// Interior rows, column groups.
    Group,
    /// First and last row.
    UpDown,
    /// One border column.
    Column(usize),
}

enum Command {
    Upload(Vec<u8>),
    Launch(Kernel),
    Barrier,
    ReadBack(Sender<Vec<u8>>),
}

/// Buffers owned by the device thread.
struct DeviceState {
    layout: KernelLayout,
    front: Vec<u8>,
    back: Vec<u8>,
}

impl DeviceState {
    fn serve(mut self, commands: Receiver<Command>) {
        for command in commands {
            match command {
                Command::Upload(cells) => {
                    self.back = vec![0; cells.len()];
                    self.front = cells;
                }
                Command::Launch(kernel) => self.launch(kernel),
                Command::Barrier => std::mem::swap(&mut self.front, &mut self.back),
                Command::ReadBack(reply) => {
                    // The host may have given up waiting; nothing to do then.
                    let _ = reply.send(self.front.clone());
                }
            }
        }
    }

    fn launch(&mut self, kernel: Kernel) {
        let (src, dst) = (&self.front, &mut self.back);
        match kernel {
            Kernel::Group => kernels::group_kernel(&self.layout, src, dst),
            Kernel::UpDown => kernels::updown_kernel(&self.layout, src, dst),
            Kernel::Column(col) => kernels::column_kernel(&self.layout, col, src, dst),
        }
    }
}

/// Handle to a running device thread.
///
/// Dropping the handle closes the queue and joins the thread.
pub struct Device {
    info: DeviceInfo,
    sender: Option<Sender<Command>>,
    handle: Option<JoinHandle<()>>,
}

impl Device {
    /// Start a device thread whose kernels follow `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DeviceSpawn`] if the thread cannot be spawned.
    pub fn open(info: DeviceInfo, layout: KernelLayout) -> Result<Self, EngineError> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let state = DeviceState {
            layout,
            front: Vec::new(),
            back: Vec::new(),
        };
        let handle = std::thread::Builder::new()
            .name("gol-device".into())
            .spawn(move || state.serve(receiver))
            .map_err(|e| EngineError::DeviceSpawn {
                reason: e.to_string(),
            })?;
        Ok(Self {
            info,
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// The device this handle drives.
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    fn submit(&self, command: Command) -> Result<(), EngineError> {
        let sender = self.sender.as_ref().ok_or(EngineError::DeviceLost)?;
        sender.send(command).map_err(|_| EngineError::DeviceLost)
    }

    /// Replace the front buffer with `cells` (0/1 bytes).
    pub fn upload(&self, cells: Vec<u8>) -> Result<(), EngineError> {
        self.submit(Command::Upload(cells))
    }

    /// Enqueue `kernel`, reading the front buffer and writing the back one.
    pub fn launch(&self, kernel: Kernel) -> Result<(), EngineError> {
        self.submit(Command::Launch(kernel))
    }

    /// Fence: wait for prior kernels, then swap front and back buffers.
    pub fn barrier(&self) -> Result<(), EngineError> {
        self.submit(Command::Barrier)
    }

    /// Block until every queued command has run and return the front buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DeviceLost`] if the device thread exited,
    /// e.g. because a kernel panicked.
    pub fn read_back(&self) -> Result<Vec<u8>, EngineError> {
        let (reply, response) = crossbeam_channel::bounded(1);
        self.submit(Command::ReadBack(reply))?;
        response.recv().map_err(|_| EngineError::DeviceLost)
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!(device = %self.info.name, "device thread panicked");
            }
        }
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device").field("info", &self.info).finish()
    }
}
