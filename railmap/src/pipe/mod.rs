mod chained;
pub use chained::ChainedPipe;

/// One processing stage. `Ok(None)` consumes the input without emitting
/// anything.
pub trait Pipe {
    type Input;
    type Output;

    type Error;

    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, Self::Error>;

    fn pipe<P>(self, other: P) -> ChainedPipe<Self, P, Self::Output, Self::Error>
    where
        Self: Sized,
        P: Pipe<Input = Self::Output, Error = Self::Error>,
    {
        ChainedPipe::new(self, other)
    }

    /// Called once the upstream producer is exhausted.
    fn close(&mut self) {}
}

pub trait Producer {
    type Item;

    fn produce(&mut self) -> Option<Self::Item>;

    fn feed<P>(self, other: P) -> ChainedPipe<Self, P, Self::Item, P::Error>
    where
        Self: Sized,
        P: Pipe<Input = Self::Item>,
    {
        ChainedPipe::new(self, other)
    }

    /// Iterator over everything left to produce.
    fn drain(self) -> Drain<Self>
    where
        Self: Sized,
    {
        Drain(self)
    }
}

impl<T> Producer for T
where
    T: Iterator,
{
    type Item = <T as Iterator>::Item;

    fn produce(&mut self) -> Option<Self::Item> {
        self.next()
    }
}

#[derive(Debug)]
pub struct Drain<P>(P);

impl<P: Producer> Iterator for Drain<P> {
    type Item = P::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.produce()
    }
}
