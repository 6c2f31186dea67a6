
#[cfg(test)]
mod config;
#[cfg(test)]
mod dump;
#[cfg(test)]
mod generate;
