pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use futures::stream::{self, Stream};
pub use itertools::Itertools as _;
pub use log::{error, info, warn};
pub use par_stream::prelude::*;
pub use serde::{Deserialize, Serialize};
pub use std::{
    borrow::Borrow,
    fmt::Debug,
    fs::{self, File},
    io::{BufRead, BufReader},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    pin::Pin,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
pub use tch::{vision, IndexOp, Kind, Tensor};
pub use tch_tensor_like::TensorLike;
