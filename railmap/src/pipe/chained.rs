use std::marker::PhantomData;

use super::{Pipe, Producer};

/// `first` feeding `then`. Over a producer it is itself a producer, over a
/// pipe it is a pipe.
#[derive(Debug)]
pub struct ChainedPipe<A, B, Shared, Error> {
    first: A,
    then: B,
    _link: PhantomData<(Shared, Error)>,
}

impl<A, B, Shared, Error> ChainedPipe<A, B, Shared, Error> {
    pub fn new(first: A, then: B) -> Self {
        Self {
            first,
            then,
            _link: PhantomData,
        }
    }
}

impl<A, B> Producer for ChainedPipe<A, B, A::Item, B::Error>
where
    A: Producer,
    B: Pipe<Input = A::Item>,
{
    type Item = Result<B::Output, B::Error>;

    fn produce(&mut self) -> Option<Self::Item> {
        loop {
            let Some(item) = self.first.produce() else {
                self.then.close();
                return None;
            };
            if let Some(output) = self.then.process(item).transpose() {
                return Some(output);
            }
        }
    }
}

impl<A, B, Shared, Error> Pipe for ChainedPipe<A, B, Shared, Error>
where
    A: Pipe<Output = Shared, Error = Error>,
    B: Pipe<Input = Shared, Error = Error>,
{
    type Input = A::Input;
    type Output = B::Output;
    type Error = Error;

    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, Self::Error> {
        match self.first.process(input)? {
            Some(shared) => self.then.process(shared),
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.first.close();
        self.then.close();
    }
}
